// Bottom-axis tick selection
use crate::domain::chart::Series;

pub const MAX_TICKS: usize = 32;

/// Every Nth label of `series`, N chosen so at most `MAX_TICKS` come out.
/// The first label is always included. The iterator can be cloned to restart it.
pub fn pick_ticks(series: &Series) -> impl Iterator<Item = &str> + Clone + '_ {
    let step = series.data.len().div_ceil(MAX_TICKS).max(1);
    series.data.iter().step_by(step).map(|point| point.x.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::SeriesPoint;
    use crate::domain::sample::Channel;

    fn series_of(len: usize) -> Series {
        Series {
            channel: Channel::Blue,
            data: (0..len)
                .map(|i| SeriesPoint {
                    x: format!("label-{}", i),
                    y: "0.00".to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_short_series_keeps_every_label() {
        let series = series_of(10);
        let ticks: Vec<_> = pick_ticks(&series).collect();

        assert_eq!(ticks.len(), 10);
        assert_eq!(ticks[0], "label-0");
    }

    #[test]
    fn test_never_more_than_max() {
        for len in [1, 31, 32, 33, 64, 65, 100, 1000, 2017] {
            let series = series_of(len);
            let ticks: Vec<_> = pick_ticks(&series).collect();

            assert!(ticks.len() <= MAX_TICKS, "len {} gave {}", len, ticks.len());
            assert_eq!(ticks[0], "label-0");
        }
    }

    #[test]
    fn test_step_is_ceiling() {
        let series = series_of(33);
        let ticks: Vec<_> = pick_ticks(&series).collect();

        assert_eq!(ticks.len(), 17);
        assert_eq!(ticks[1], "label-2");
    }

    #[test]
    fn test_empty_series() {
        assert_eq!(pick_ticks(&series_of(0)).count(), 0);
    }

    #[test]
    fn test_restartable() {
        let series = series_of(70);
        let ticks = pick_ticks(&series);

        assert_eq!(ticks.clone().count(), ticks.count());
    }
}
