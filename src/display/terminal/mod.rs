mod events;
mod terminal;

pub use self::terminal::App;
