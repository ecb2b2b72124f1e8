/// Identifier for a strand in a [`crate::bundle::StrandBundle`].
///
/// This is an index in `[0, strand_count)` and is only meaningful until the
/// bundle is next reconfigured.
pub type StrandId = usize;
