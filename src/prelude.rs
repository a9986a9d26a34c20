//! Prelude module for common imports.
//!
//! ```ignore
//! use vdom_mount::prelude::*;
//! ```

// Entry points
pub use crate::apply::apply_properties;
pub use crate::mount::{materialize, mount};

// Configuration
pub use crate::config::MountConfig;

// Context
pub use crate::context::ParentContext;

// Host surface
pub use crate::dom::{Dom, PropWrite, SVG_NAMESPACE};

// Node types
pub use crate::node::{Children, VElement, VText, VirtualNode, Widget};

// Property values
pub use crate::props::{Callback, Hook, ObjectValue, PropValue, Props, Style, StyleRules};

// Reference host
pub use crate::memory::{MemoryDom, NodeId, NodeKind, SlotValue};

// Error types
pub use crate::error::{DomError, DomResult};
