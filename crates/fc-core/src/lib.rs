pub mod change;
pub mod codec;
pub mod id;
pub mod lint;
pub mod model;
pub mod topology;

pub use change::{EdgeChange, NodeChange};
pub use codec::{
    CodecError, project_from_json, project_from_msgpack, project_to_json, project_to_msgpack,
};
pub use id::{EdgeId, NodeId};
pub use lint::{LintDiagnostic, LintInput, LintSeverity, LintTarget, lint_graph};
pub use model::*;
pub use topology::Topology;
