pub mod congress;
pub mod courtlistener;
pub mod scotus;
