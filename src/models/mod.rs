pub mod essay;
pub mod progress;
pub mod settings;

pub use essay::{Essay, EssayMetadata};
pub use progress::{ReadingProgress, READ_THRESHOLD};
pub use settings::{Settings, SettingsPatch};
