pub mod api;
pub mod ast;
pub mod chord;
pub mod chordpro;
pub mod directive;
pub mod error;
pub mod key;
pub mod lexer;
pub mod notation;
pub mod parser;
pub mod pitch;
pub mod render;
pub mod settings;
pub mod transpose;

pub use api::{
    prepare_document, process, render_song, write_source, ProcessInput, ProcessOutput, Session,
    SessionState, Status, FALLBACK_MESSAGE,
};
pub use ast::*;
pub use chord::parse_chord;
pub use chordpro::to_chordpro;
pub use directive::normalize;
pub use error::*;
pub use key::resolve_key;
pub use notation::{translate_chord, translate_document, translate_name};
pub use parser::{parse, parse_normalized, parse_with_notation};
pub use render::render;
pub use settings::{EngineConfig, NotationSystem, RenderSettings, SongMeta, TransposeState};
pub use transpose::{transpose_chord, transpose_document};
