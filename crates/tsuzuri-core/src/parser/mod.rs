pub mod common;
pub mod directory;
pub mod dispatch;
pub mod episode;
pub mod movie;
pub mod opening_ending;
pub mod original_animation;

pub use common::{CommonHeader, GrammarContext, HeaderGrammar, SharedGrammar};
pub use directory::DirectoryGrammar;
pub use dispatch::{parse, FansubParser, ParserConfig};
pub use episode::EpisodeGrammar;
pub use movie::MovieGrammar;
pub use opening_ending::OpeningEndingGrammar;
pub use original_animation::OriginalAnimationGrammar;
