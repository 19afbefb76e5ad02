use super::QuadCmd;

/// One recorded draw.
///
/// The narrative scene is built entirely from quads; new primitives get a
/// variant here and a renderer under `render`.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Quad(QuadCmd),
}
