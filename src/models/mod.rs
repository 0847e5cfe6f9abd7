mod timeseries;

pub use timeseries::BarSeries;
