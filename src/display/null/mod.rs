mod null;

pub use self::null::App;
