//! Volume spike detection against a trailing baseline.

use statrs::statistics::Statistics;

use crate::config::VolumeAnomalySettings;
use crate::models::BarSeries;
use crate::patterns::VolumeAnomaly;

/// Flag bars whose volume exceeds mean + multiplier * stddev of the
/// `window_size` bars immediately before them. The current bar is kept out
/// of its own baseline so a single spike cannot mask itself.
pub fn detect_volume_anomalies(
    bars: &BarSeries,
    settings: &VolumeAnomalySettings,
) -> Vec<VolumeAnomaly> {
    let volumes = &bars.volumes;
    let window = settings.window_size;
    if window == 0 || volumes.len() <= window {
        return Vec::new();
    }

    let mut found = Vec::new();

    for i in window..volumes.len() {
        let trailing = &volumes[i - window..i];
        let mean = trailing.mean();
        let stddev = trailing.population_std_dev();

        let threshold = mean + settings.multiplier * stddev;
        if volumes[i] > threshold {
            // How many baseline deviations the spike sits above the mean
            let sigma = if stddev > f64::EPSILON {
                (volumes[i] - mean) / stddev
            } else {
                f64::INFINITY
            };
            found.push(VolumeAnomaly {
                index: i,
                sigma,
                bar_kind: bars.get_bar(i).kind(),
            });
        }
    }

    found
}
