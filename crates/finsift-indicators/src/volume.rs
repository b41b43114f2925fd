use finsift_core::Bar;

use crate::all_undefined;

/// On-balance volume.
///
/// Cumulative sum seeded at 0 on the first bar; each later bar adds the
/// bar's volume when the close rose, subtracts it when the close fell, and
/// adds nothing on an unchanged close. Bars without volume data contribute
/// zero.
pub fn obv(bars: &[Bar]) -> Vec<Option<f64>> {
    let len = bars.len();
    if len < 2 {
        return all_undefined(len);
    }

    let mut out = Vec::with_capacity(len);
    let mut running = 0.0;
    out.push(Some(running));

    for index in 1..len {
        let volume = bars[index].volume.unwrap_or(0.0);
        if bars[index].close > bars[index - 1].close {
            running += volume;
        } else if bars[index].close < bars[index - 1].close {
            running -= volume;
        }
        out.push(Some(running));
    }

    out
}
