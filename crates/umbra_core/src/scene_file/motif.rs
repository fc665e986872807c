//! Entry motifs: the declarative schema of every scene file entry.

use std::fmt;

/// Kinds of entries a scene file may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Camera,
    Light,
    Plane,
    Sphere,
    Cylinder,
}

impl EntryKind {
    /// Label that opens an entry of this kind.
    pub fn label(self) -> &'static str {
        match self {
            EntryKind::Camera => "camera",
            EntryKind::Light => "light",
            EntryKind::Plane => "plane",
            EntryKind::Sphere => "sphere",
            EntryKind::Cylinder => "cylinder",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        MOTIFS
            .iter()
            .map(|m| m.kind)
            .find(|kind| kind.label() == label)
    }

    /// Schema for this kind.
    pub fn motif(self) -> &'static EntryMotif {
        // MOTIFS holds one motif per kind in declaration order.
        &MOTIFS[self as usize]
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Shape of a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Three reals
    Vector,
    /// One real
    Real,
    /// A quoted PNG filename
    Text,
}

impl ValueKind {
    /// Tokens on a parameter line, label included.
    pub fn token_count(self) -> usize {
        match self {
            ValueKind::Vector => 4,
            ValueKind::Real | ValueKind::Text => 2,
        }
    }
}

/// Value check applied to numeric parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueCheck {
    Any,
    /// At least one component differs from zero
    NonZero,
    /// At least one component is greater than zero
    Positive,
    /// At least one component lies in [0, 1]
    ZeroOne,
}

impl ValueCheck {
    pub fn accepts(self, values: &[f64]) -> bool {
        match self {
            ValueCheck::Any => true,
            ValueCheck::NonZero => values.iter().any(|&v| v != 0.0),
            ValueCheck::Positive => values.iter().any(|&v| v > 0.0),
            ValueCheck::ZeroOne => values.iter().any(|&v| (0.0..=1.0).contains(&v)),
        }
    }
}

/// Schema of one parameter.
#[derive(Debug, Clone, Copy)]
pub struct ParameterMotif {
    pub label: &'static str,
    pub kind: ValueKind,
    pub check: ValueCheck,
    /// Value used when the parameter is absent; `None` means required
    pub default: Option<&'static [f64]>,
    /// Index of the parameter that can stand in for this one
    pub alternative: Option<usize>,
}

impl ParameterMotif {
    const fn required(label: &'static str, kind: ValueKind, check: ValueCheck) -> Self {
        Self {
            label,
            kind,
            check,
            default: None,
            alternative: None,
        }
    }

    const fn optional(
        label: &'static str,
        kind: ValueKind,
        check: ValueCheck,
        default: &'static [f64],
    ) -> Self {
        Self {
            label,
            kind,
            check,
            default: Some(default),
            alternative: None,
        }
    }

    const fn either(label: &'static str, kind: ValueKind, alternative: usize) -> Self {
        Self {
            label,
            kind,
            check: ValueCheck::Any,
            default: None,
            alternative: Some(alternative),
        }
    }
}

/// Schema of one entry kind.
#[derive(Debug)]
pub struct EntryMotif {
    pub kind: EntryKind,
    /// The scene is invalid without at least one entry of this kind
    pub mandatory: bool,
    /// Upper bound on entries of this kind, if any
    pub max_count: Option<usize>,
    pub parameters: &'static [ParameterMotif],
}

impl EntryMotif {
    /// Position of a parameter by label.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.parameters.iter().position(|p| p.label == label)
    }
}

use ValueCheck::{Any, NonZero, Positive, ZeroOne};
use ValueKind::{Real, Text, Vector};

const CAMERA: &[ParameterMotif] = &[
    ParameterMotif::required("position", Vector, Any),
    ParameterMotif::required("target", Vector, Any),
    ParameterMotif::optional("roll", Real, Any, &[0.0]),
];

const LIGHT: &[ParameterMotif] = &[ParameterMotif::required("position", Vector, Any)];

const PLANE: &[ParameterMotif] = &[
    ParameterMotif::required("center", Vector, Any),
    ParameterMotif::required("normal", Vector, NonZero),
    ParameterMotif::required("scale", Real, Positive),
    ParameterMotif::optional("reflect", Real, ZeroOne, &[0.0]),
    ParameterMotif::either("color", Vector, 5),
    ParameterMotif::either("texture", Text, 4),
];

const SPHERE: &[ParameterMotif] = &[
    ParameterMotif::required("position", Vector, Any),
    ParameterMotif::required("radius", Real, Positive),
    ParameterMotif::optional("axis", Vector, NonZero, &[0.0, 0.0, 1.0]),
    ParameterMotif::optional("reflect", Real, ZeroOne, &[0.0]),
    ParameterMotif::either("color", Vector, 5),
    ParameterMotif::either("texture", Text, 4),
];

const CYLINDER: &[ParameterMotif] = &[
    ParameterMotif::required("center", Vector, Any),
    ParameterMotif::required("direction", Vector, NonZero),
    ParameterMotif::required("radius", Real, Positive),
    ParameterMotif::optional("span", Real, NonZero, &[-1.0]),
    ParameterMotif::optional("reflect", Real, ZeroOne, &[0.0]),
    ParameterMotif::either("color", Vector, 6),
    ParameterMotif::either("texture", Text, 5),
];

/// Number of entry kinds.
pub const ENTRY_KIND_COUNT: usize = 5;

/// All motifs, indexed by `EntryKind as usize`.
pub static MOTIFS: [EntryMotif; ENTRY_KIND_COUNT] = [
    EntryMotif {
        kind: EntryKind::Camera,
        mandatory: true,
        max_count: Some(1),
        parameters: CAMERA,
    },
    EntryMotif {
        kind: EntryKind::Light,
        mandatory: true,
        max_count: Some(1),
        parameters: LIGHT,
    },
    EntryMotif {
        kind: EntryKind::Plane,
        mandatory: false,
        max_count: None,
        parameters: PLANE,
    },
    EntryMotif {
        kind: EntryKind::Sphere,
        mandatory: false,
        max_count: None,
        parameters: SPHERE,
    },
    EntryMotif {
        kind: EntryKind::Cylinder,
        mandatory: false,
        max_count: None,
        parameters: CYLINDER,
    },
];
