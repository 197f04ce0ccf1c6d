#![forbid(unsafe_code)]

//! Capability traits shared by state objects.
//!
//! - [`Serializable`]: a state that round-trips through a compact text form
//!   (the location query).
//! - [`Validatable`]: a state or config that can be clamped into the bounds
//!   the rest of the viewer expects.

/// Round-trips through a text encoding.
///
/// `deserialize` never fails: unknown parts and malformed values are skipped
/// and the rest is applied on top of `Default`.
pub trait Serializable: Sized + Default {
    /// Encode to the text form.
    fn serialize(&self) -> String;

    /// Decode, ignoring anything that does not parse.
    fn deserialize(input: &str) -> Self;
}

/// Clamps itself into valid bounds.
pub trait Validatable: Sized {
    /// What the value is validated against.
    type Bounds;

    /// Return a copy with every field inside `bounds`.
    #[must_use]
    fn validate(self, bounds: &Self::Bounds) -> Self;
}
