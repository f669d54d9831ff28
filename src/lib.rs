//! Two-point map selection with remote rendering and pixel refinement.
//!
//! A widget instance lets the user pick two geographic points on a map. Once
//! both exist, the pair is sent to a remote render endpoint and the returned
//! image is shown next to the map. Clicking inside that image asks the remote
//! service which coordinate the clicked pixel corresponds to, and that
//! coordinate replaces the second point.
//!
//! The map library, the image element and the HTTP transport are all
//! collaborators behind traits, so everything in this crate runs (and is
//! tested) without a browser.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`geo`] | `Coordinate` and `PixelOffset` value types |
//! | [`consts`] | Endpoint suffixes, query parameter names, default view |
//! | [`selection`] | Selection state and its pure transitions |
//! | [`dispatch`] | Render requests and render URI building |
//! | [`refine`] | Pixel lookup URIs, sequence tagging, HTTP lookup client |
//! | [`view`] | Map view and image surface contracts |
//! | [`widget`] | A configured widget instance driving all of the above |
//! | [`config`] | Typed widget configuration |
//! | [`error`] | Crate error type |

pub mod config;
pub mod consts;
pub mod dispatch;
pub mod error;
pub mod geo;
pub mod refine;
pub mod selection;
pub mod view;
pub mod widget;

pub use config::WidgetConfig;
pub use dispatch::RenderRequest;
pub use error::PickError;
pub use geo::{Coordinate, PixelOffset};
pub use selection::{Effect, MarkerSlot, SelectionState};
pub use widget::{Resolution, Widget};
