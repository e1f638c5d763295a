// Presentation layer - Rendering collaborators and user controls
pub mod controls;
pub mod format;
pub mod json_renderer;
pub mod renderer;
pub mod terminal_renderer;
