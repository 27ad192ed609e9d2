//! StatGate Orchestrator - analysis orchestration and HTTP API
//!
//! # Architecture
//!
//! ```text
//! statgate-orchestrator/
//! ├── application/      # Analysis use cases (submit, columns, history)
//! └── presentation/     # HTTP layer
//!     ├── auth/         # Auth endpoints, bearer gate, identity extractor
//!     ├── controllers/  # Analysis, history and health handlers
//!     ├── middleware.rs # Error mapping, request logging
//!     ├── models.rs     # DTOs with OpenAPI schemas
//!     └── routes.rs     # Router and OpenAPI document
//! ```
//!
//! # API Endpoints
//!
//! | Endpoint | Method | Auth |
//! |----------|--------|------|
//! | `/api/auth/register` | POST | public |
//! | `/api/auth/login` | POST | public |
//! | `/api/user/change-password` | POST | bearer |
//! | `/api/analyze` | POST (multipart) | bearer |
//! | `/api/columns` | POST (multipart) | bearer |
//! | `/api/analyses/history` | GET | bearer |
//! | `/api/analyses/history/{run_id}/results` | GET | bearer |
//! | `/api/analyses/history/{run_id}` | DELETE | bearer |
//! | `/health` | GET | public |

pub mod application;
pub mod presentation;

pub use presentation::{ApiDoc, ApiState, create_router};
