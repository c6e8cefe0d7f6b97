//! Data Transfer Objects (DTOs) for the CAD service wire format.
//!
//! These DTOs mirror the JSON bodies of the remote service. They are private
//! to the infrastructure layer and are converted into core types at the edge,
//! so wire quirks (optional fields, tuple-encoded shapes, lowercase modes)
//! never leak into the domain.

mod conversation;
mod result;

pub use conversation::{ConversationDetailDTO, ConversationListDTO, ConversationMessageDTO};
pub use result::{CadResponseDTO, QueryRequestDTO};
