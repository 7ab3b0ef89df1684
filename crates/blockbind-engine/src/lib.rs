pub mod extract;
pub mod markup;
pub mod registry;
pub mod render;
pub mod schema;
pub mod value;
pub mod version;

// Re-export key types for easier usage
pub use extract::extract;
pub use markup::{Node, parse_fragment, write_fragment};
pub use registry::{BlockRegistry, Loaded, RegistryError};
pub use render::{RenderError, Template, el, render};
pub use schema::{AttributeDefinition, Extraction, SchemaError};
pub use value::{AttributeRecord, Inline, Item, Value, ValueType};
pub use version::{Resolved, Shape, VersionChain, VersionEntry};
