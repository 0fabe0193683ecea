/// Event contracts between the composer, the sidebar and the coordinator.
pub mod events;
pub mod message_input;
pub mod message_list;
pub mod scroll_manager;
pub mod sidebar;
pub mod ticket_card;
pub mod view;

pub use events::{DraftChanged, NavigationChanged, Submit};
pub use message_input::MessageInput;
pub use message_list::MessageList;
pub use scroll_manager::ScrollManager;
pub use sidebar::ChatSidebar;
pub use view::ChatView;
