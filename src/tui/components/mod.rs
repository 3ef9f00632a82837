//! # TUI Components
//!
//! All UI components of the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Created each frame with everything they display:
//! - `Header`: product name, theme indicator, shortcut hints
//! - `WelcomeBanner`: greeting shown while the conversation is empty
//! - `MessageView`: a single chat turn
//! - `ToastStack`: transient notifications
//!
//! ### Stateful Components (Event-Driven)
//!
//! Persistent state in `TuiState`, a transient wrapper for rendering, and
//! high-level events emitted back to the event loop:
//! - `InputBox`: composer with recording and attach/tool menus
//! - `MessageList`: scrollable timeline with layout caching
//! - `Sidebar`: conversation list
//! - `CommandPalette`: search overlay
//! - `ControlCenter`: tabbed settings overlay
//! - `FilePicker`: file selection for attachments
//!
//! Components receive external data as props instead of reading `App`
//! directly, which keeps them testable with `TestBackend`.
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── overlay.rs          (centered_rect, truncate_str)
//! ├── header.rs
//! ├── welcome.rs
//! ├── message.rs
//! ├── message_list.rs
//! ├── input_box/          (composer, cursor, wrapping)
//! ├── pick_menu.rs        (attach / tool menus)
//! ├── sidebar.rs
//! ├── command_palette.rs
//! ├── control_center.rs
//! ├── file_picker.rs
//! └── toast_stack.rs
//! ```

pub mod command_palette;
pub mod control_center;
pub mod file_picker;
pub mod header;
pub mod input_box;
pub mod message;
pub mod message_list;
pub mod overlay;
pub mod pick_menu;
pub mod sidebar;
pub mod toast_stack;
pub mod welcome;

pub use command_palette::{CommandPalette, CommandPaletteState, PaletteEvent};
pub use control_center::{ControlCenter, ControlCenterState, ControlEvent};
pub use file_picker::{FilePicker, FilePickerEvent, FilePickerState};
pub use header::Header;
pub use input_box::{InputBox, InputEvent};
pub use message_list::{MessageList, MessageListState};
pub use sidebar::{Sidebar, SidebarEvent, SidebarState};
pub use toast_stack::ToastStack;
pub use welcome::WelcomeBanner;
