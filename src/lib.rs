pub mod attr;
pub mod error;
pub mod fold;
pub mod handler;
pub mod level;
pub mod record;
pub mod sink;
pub mod ordered;
pub mod ring;
pub mod logger;
pub mod layer;
pub mod init;

pub use attr::{Attr, Kind, Value};
pub use error::{Error, ErrorAttr};
pub use handler::{Handler, ObserverHandler};
pub use init::{observe, observe_default, observe_tracing, ObserverConfig};
pub use layer::ObserverLayer;
pub use level::Level;
pub use logger::Logger;
pub use ordered::OrderedLogs;
pub use record::{LoggedRecord, Record};
pub use ring::RingLogs;
pub use sink::ObservedLogs;
