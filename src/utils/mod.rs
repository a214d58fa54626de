//! Small pure helpers shared by the build and serve paths.

pub mod html;
pub mod mime;
pub mod path;
