//! Human readable field dumps of the decoded structures.

use std::fmt;

/// A decoded structure which can list its fields.
///
/// The first entry is always `bytes`, the hex of the structure as found in the capture,
/// followed by every field in wire order.
pub trait Describe {
    /// Name of the structure
    fn name(&self) -> &'static str;

    /// `(field name, rendered value)` pairs
    fn fields(&self) -> Vec<(&'static str, String)>;

    /// Returns a `Display` adapter printing the name and one `field value` line per field.
    fn describe(&self) -> FieldDump<'_, Self>
    where
        Self: Sized,
    {
        FieldDump(self)
    }
}

/// `Display` adapter returned by [`Describe::describe`].
pub struct FieldDump<'a, T: ?Sized>(&'a T);

impl<T: Describe + ?Sized> fmt::Display for FieldDump<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self.0.fields();
        let width = fields.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

        write!(f, "{}:", self.0.name())?;
        for (name, value) in fields {
            write!(f, "\n  {name:<width$} {value}")?;
        }

        Ok(())
    }
}
