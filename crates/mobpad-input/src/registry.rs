//! Colour registry: maps paint colours to logical inputs.
//!
//! The registry is built once at startup and shared read-only by the region
//! locator and the pad state. Every colour resolves to exactly one
//! [`InputDescriptor`] and every descriptor has exactly one [`InputKind`].

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;

use mobpad_errors::InputError;
use serde::{Deserialize, Serialize};

use crate::colour::{ColourKey, CompositeKey};

/// Input category. Selects the activate/reset rule applied to an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    /// Boolean, held while pressed
    Button,
    /// Four boolean directions derived from position in the region
    Dirpad,
    /// Single axis in `[0, 1]` derived from vertical position in the region
    #[serde(rename = "axis_1d")]
    Axis1D,
    /// Analog stick relative to the press-down point, clamped to the unit circle
    #[serde(rename = "axis_2d")]
    Axis2D,
}

impl InputKind {
    /// Whether activation needs the region's bounding box.
    pub fn uses_region(&self) -> bool {
        matches!(self, InputKind::Dirpad | InputKind::Axis1D)
    }

    /// Whether the overlay should be given a box for this kind.
    pub fn has_drawn_region(&self) -> bool {
        !matches!(self, InputKind::Button)
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputKind::Button => write!(f, "Button"),
            InputKind::Dirpad => write!(f, "Dirpad"),
            InputKind::Axis1D => write!(f, "Axis1D"),
            InputKind::Axis2D => write!(f, "Axis2D"),
        }
    }
}

/// A logical input: its identifier and category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputDescriptor {
    id: String,
    kind: InputKind,
}

impl InputDescriptor {
    /// Create a descriptor.
    pub fn new(id: impl Into<String>, kind: InputKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    /// Logical input identifier, e.g. `BUTTON_A`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Input category.
    pub fn kind(&self) -> InputKind {
        self.kind
    }
}

impl fmt::Display for InputDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.kind)
    }
}

/// Immutable colour-to-input table.
#[derive(Debug, Clone, Default)]
pub struct ColourRegistry {
    descriptors: Vec<InputDescriptor>,
    regions: Vec<CompositeKey>,
    by_colour: HashMap<ColourKey, usize>,
    by_id: HashMap<String, usize>,
}

impl ColourRegistry {
    /// Start building a registry.
    pub fn builder() -> ColourRegistryBuilder {
        ColourRegistryBuilder::default()
    }

    /// The stock controller layout.
    pub fn standard() -> Self {
        let mut builder = Self::builder();
        for (colour, id) in standard::BUTTONS {
            builder = builder.button(id, colour);
        }
        builder = builder.dirpad(standard::DPAD_ID, standard::DPAD);
        for (colour, id) in standard::TRIGGERS {
            builder = builder.axis_1d(id, colour);
        }
        for (colour, id) in standard::STICKS {
            builder = builder.axis_2d(id, colour);
        }
        // Stock table is conflict free.
        builder.build().unwrap_or_default()
    }

    /// Resolve a sampled colour. `None` is the normal background outcome.
    pub fn lookup(&self, colour: ColourKey) -> Option<&InputDescriptor> {
        self.by_colour
            .get(&colour)
            .and_then(|&index| self.descriptors.get(index))
    }

    /// Find a descriptor by input id.
    pub fn descriptor(&self, id: &str) -> Option<&InputDescriptor> {
        self.by_id
            .get(id)
            .and_then(|&index| self.descriptors.get(index))
    }

    /// The composite key painting an input's region.
    pub fn region_key(&self, id: &str) -> Option<&CompositeKey> {
        self.by_id.get(id).and_then(|&index| self.regions.get(index))
    }

    /// Iterate descriptors with their composite keys, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&InputDescriptor, &CompositeKey)> {
        self.descriptors.iter().zip(self.regions.iter())
    }

    /// Descriptors of a single category.
    pub fn of_kind(&self, kind: InputKind) -> impl Iterator<Item = &InputDescriptor> {
        self.descriptors.iter().filter(move |d| d.kind == kind)
    }

    /// Number of logical inputs.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether no inputs are registered.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Number of registered colours.
    pub fn colour_count(&self) -> usize {
        self.by_colour.len()
    }
}

/// Builder for [`ColourRegistry`].
///
/// Binding the same id again with the same kind adds colours to its region.
/// Conflicts are reported by [`build`](Self::build).
#[derive(Debug, Default)]
pub struct ColourRegistryBuilder {
    bindings: Vec<(InputDescriptor, Vec<ColourKey>)>,
}

impl ColourRegistryBuilder {
    /// Bind colours to an input of the given kind.
    pub fn bind(
        mut self,
        id: impl Into<String>,
        kind: InputKind,
        colours: impl IntoIterator<Item = ColourKey>,
    ) -> Self {
        self.bindings.push((
            InputDescriptor::new(id, kind),
            colours.into_iter().collect(),
        ));
        self
    }

    /// Bind a single colour to a button.
    pub fn button(self, id: impl Into<String>, colour: ColourKey) -> Self {
        self.bind(id, InputKind::Button, [colour])
    }

    /// Bind the union of several colours to a directional pad.
    pub fn dirpad(self, id: impl Into<String>, colours: impl IntoIterator<Item = ColourKey>) -> Self {
        self.bind(id, InputKind::Dirpad, colours)
    }

    /// Bind a colour to a 1-D trigger axis.
    pub fn axis_1d(self, id: impl Into<String>, colour: ColourKey) -> Self {
        self.bind(id, InputKind::Axis1D, [colour])
    }

    /// Bind a colour to a 2-D analog stick.
    pub fn axis_2d(self, id: impl Into<String>, colour: ColourKey) -> Self {
        self.bind(id, InputKind::Axis2D, [colour])
    }

    /// Validate the bindings and build the registry.
    ///
    /// # Errors
    ///
    /// - [`InputError::ConflictingKind`] if an id is bound under two kinds
    /// - [`InputError::DuplicateColour`] if a colour is bound to two ids
    /// - [`InputError::EmptyRegion`] if an id ends up with no colours
    pub fn build(self) -> Result<ColourRegistry, InputError> {
        let mut registry = ColourRegistry::default();
        let mut members: Vec<Vec<ColourKey>> = Vec::new();

        for (descriptor, colours) in self.bindings {
            let index = match registry.by_id.entry(descriptor.id.clone()) {
                Entry::Occupied(entry) => {
                    let index = *entry.get();
                    let existing = registry.descriptors.get(index).map(InputDescriptor::kind);
                    if let Some(existing) = existing.filter(|kind| *kind != descriptor.kind) {
                        return Err(InputError::ConflictingKind {
                            id: descriptor.id,
                            existing: existing.to_string(),
                            requested: descriptor.kind.to_string(),
                        });
                    }
                    index
                }
                Entry::Vacant(entry) => {
                    let index = registry.descriptors.len();
                    entry.insert(index);
                    registry.descriptors.push(descriptor.clone());
                    members.push(Vec::new());
                    index
                }
            };

            for colour in colours {
                match registry.by_colour.entry(colour) {
                    Entry::Occupied(entry) if *entry.get() != index => {
                        let existing = registry
                            .descriptors
                            .get(*entry.get())
                            .map(|d| d.id.clone())
                            .unwrap_or_default();
                        return Err(InputError::DuplicateColour {
                            colour: colour.to_string(),
                            existing,
                            requested: descriptor.id,
                        });
                    }
                    Entry::Occupied(_) => {}
                    Entry::Vacant(entry) => {
                        entry.insert(index);
                        if let Some(list) = members.get_mut(index) {
                            list.push(colour);
                        }
                    }
                }
            }
        }

        for (descriptor, colours) in registry.descriptors.iter().zip(&members) {
            if colours.is_empty() {
                return Err(InputError::EmptyRegion(descriptor.id.clone()));
            }
        }

        registry.regions = members.into_iter().map(CompositeKey::new).collect();
        Ok(registry)
    }
}

/// Colours of the stock layout image.
pub mod standard {
    use crate::colour::ColourKey;

    /// Id of the stock directional pad.
    pub const DPAD_ID: &str = "BUTTON_DPAD";

    /// Face, shoulder, stick-click and menu buttons.
    pub const BUTTONS: [(ColourKey, &str); 11] = [
        (ColourKey::opaque(58, 47, 42), "BUTTON_A"),
        (ColourKey::opaque(46, 56, 48), "BUTTON_B"),
        (ColourKey::opaque(53, 31, 41), "BUTTON_X"),
        (ColourKey::opaque(23, 15, 53), "BUTTON_Y"),
        (ColourKey::opaque(34, 51, 45), "BUTTON_BACK"),
        (ColourKey::opaque(51, 35, 41), "BUTTON_GUIDE"),
        (ColourKey::opaque(44, 51, 28), "BUTTON_START"),
        (ColourKey::opaque(33, 38, 51), "BUTTON_LEFTSTICK"),
        (ColourKey::opaque(51, 48, 26), "BUTTON_RIGHTSTICK"),
        (ColourKey::opaque(51, 14, 31), "BUTTON_LEFTSHOULDER"),
        (ColourKey::opaque(23, 31, 53), "BUTTON_RIGHTSHOULDER"),
    ];

    /// The four arrow colours that together form the directional pad.
    pub const DPAD: [ColourKey; 4] = [
        ColourKey::opaque(63, 11, 10),
        ColourKey::opaque(48, 58, 48),
        ColourKey::opaque(61, 49, 39),
        ColourKey::opaque(46, 41, 58),
    ];

    /// Analog triggers.
    pub const TRIGGERS: [(ColourKey, &str); 2] = [
        (ColourKey::opaque(255, 255, 255), "AXIS_TRIGGERLEFT"),
        (ColourKey::opaque(0, 0, 0), "AXIS_TRIGGERRIGHT"),
    ];

    /// Analog sticks.
    pub const STICKS: [(ColourKey, &str); 2] = [
        (ColourKey::opaque(255, 0, 0), "AXIS_LEFT"),
        (ColourKey::opaque(0, 255, 242), "AXIS_RIGHT"),
    ];
}
