// Definition persistence
//
// Administrative changes to schemes and transformation groups are pushed
// to a sink as complete, freshly serialized line sets. The sink decides
// where they go; the engine never touches the filesystem itself.

use std::io;

/// Destination for serialized definition sets.
///
/// Each call receives the full contents, one definition per line, and
/// replaces whatever the sink held before.
pub trait DefinitionSink {
    fn store_schemes(&mut self, lines: &[String]) -> io::Result<()>;

    fn store_transformations(&mut self, lines: &[String]) -> io::Result<()>;
}

/// Sink that discards everything. Used for in-memory sessions and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DefinitionSink for NullSink {
    fn store_schemes(&mut self, _lines: &[String]) -> io::Result<()> {
        Ok(())
    }

    fn store_transformations(&mut self, _lines: &[String]) -> io::Result<()> {
        Ok(())
    }
}
