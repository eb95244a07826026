pub mod accumulator;
pub mod classifier;
pub mod key;

pub use accumulator::{Accumulator, Position};
pub use classifier::{classify, Action, EventClassifier, LineSink};
pub use key::{KeyEvent, KeyId, NamedKey};
