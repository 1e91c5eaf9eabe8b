pub mod ad_channel;

pub use ad_channel::AdChannel;
