//! Overs/balls arithmetic for a 20-over innings.
//!
//! Overs are written in cricket notation `O.B`: the digit after the point is
//! the number of balls bowled in the current over (1–6), not a decimal
//! fraction. `12.4` is twelve complete overs plus four balls, i.e. 76 balls.

/// Legal deliveries in a T20 innings.
pub const INNINGS_BALLS: u32 = 120;
pub const BALLS_PER_OVER: u32 = 6;
const INNINGS_OVERS: u32 = 20;

/// Split `O.B` into `(O, B)`. Negative input is treated as zero.
fn split_overs(overs: f64) -> (u32, u32) {
    let whole = overs.max(0.0).floor();
    let balls = ((overs.max(0.0) - whole) * 10.0).round_ties_even();
    (whole as u32, balls as u32)
}

/// Build the `O.B` value for `overs` complete overs and `balls` into the next.
fn join_overs(overs: u32, balls: u32) -> f64 {
    (overs * 10 + balls) as f64 / 10.0
}

/// Balls bowled so far: `O * 6 + B`. `B = 0` counts as no balls into the over.
pub fn balls_from_overs(overs: f64) -> u32 {
    let (o, b) = split_overs(overs);
    o * BALLS_PER_OVER + b
}

/// Balls remaining in the innings, never negative.
pub fn balls_left(balls_bowled: u32) -> u32 {
    INNINGS_BALLS.saturating_sub(balls_bowled)
}

/// Display form of the remaining balls, e.g. 44 balls → `"7.2"`.
///
/// Unlike input notation, `.0` is valid here ("0 balls into the next over").
pub fn format_overs_left(balls_left: u32) -> String {
    format!("{}.{}", balls_left / BALLS_PER_OVER, balls_left % BALLS_PER_OVER)
}

/// True for the 120 selectable values `0.1..=19.6` with a ball digit of 1–6.
pub fn is_legal_overs(overs: f64) -> bool {
    if !overs.is_finite() || overs < 0.0 {
        return false;
    }
    let (o, b) = split_overs(overs);
    if o >= INNINGS_OVERS || !(1..=BALLS_PER_OVER).contains(&b) {
        return false;
    }
    (overs - join_overs(o, b)).abs() < 1e-9
}

/// Every legal overs value in ascending order.
pub fn valid_overs() -> Vec<f64> {
    (0..INNINGS_OVERS)
        .flat_map(|o| (1..=BALLS_PER_OVER).map(move |b| join_overs(o, b)))
        .collect()
}

/// The next legal value: `12.6` → `13.1`.
pub fn next_ball(overs: f64) -> f64 {
    let (mut o, mut b) = split_overs(overs);
    b += 1;
    if b > BALLS_PER_OVER {
        o += 1;
        b = 1;
    }
    join_overs(o, b)
}

/// The previous legal value: `13.1` → `12.6`. Never goes below `0.1`.
pub fn prev_ball(overs: f64) -> f64 {
    let (o, b) = split_overs(overs);
    let (o, b) = (o as i64, b as i64 - 1);
    let (o, b) = if b < 1 { (o - 1, BALLS_PER_OVER as i64) } else { (o, b) };
    if o < 0 {
        return join_overs(0, 1);
    }
    join_overs(o as u32, b as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balls_from_overs_known_values() {
        assert_eq!(balls_from_overs(12.4), 76);
        assert_eq!(balls_from_overs(0.1), 1);
        assert_eq!(balls_from_overs(19.6), 120);
        assert_eq!(balls_from_overs(7.3), 45);
    }

    #[test]
    fn zero_ball_digit_counts_as_no_balls() {
        assert_eq!(balls_from_overs(0.0), 0);
        assert_eq!(balls_from_overs(5.0), 30);
    }

    #[test]
    fn balls_left_stays_in_range_for_every_legal_value() {
        for ov in valid_overs() {
            let bowled = balls_from_overs(ov);
            let left = balls_left(bowled);
            assert!(left <= INNINGS_BALLS, "{ov} gave {left}");
            assert_eq!(left, INNINGS_BALLS - bowled.min(INNINGS_BALLS));
        }
    }

    #[test]
    fn balls_left_clamps_past_innings_end() {
        assert_eq!(balls_left(130), 0);
        assert_eq!(balls_left(120), 0);
        assert_eq!(balls_left(76), 44);
    }

    #[test]
    fn overs_left_display() {
        assert_eq!(format_overs_left(44), "7.2");
        assert_eq!(format_overs_left(120), "20.0");
        assert_eq!(format_overs_left(0), "0.0");
    }

    #[test]
    fn legal_overs_domain() {
        assert!(is_legal_overs(0.1));
        assert!(is_legal_overs(12.4));
        assert!(is_legal_overs(19.6));
        assert!(!is_legal_overs(0.0));
        assert!(!is_legal_overs(12.0));
        assert!(!is_legal_overs(12.7));
        assert!(!is_legal_overs(20.1));
        assert!(!is_legal_overs(12.45));
        assert!(!is_legal_overs(-0.1));
        assert!(!is_legal_overs(f64::NAN));
    }

    #[test]
    fn valid_overs_has_one_entry_per_ball() {
        let all = valid_overs();
        assert_eq!(all.len(), 120);
        assert_eq!(all[0], 0.1);
        assert_eq!(all[5], 0.6);
        assert_eq!(all[6], 1.1);
        assert_eq!(all[119], 19.6);
        assert!(all.iter().all(|&ov| is_legal_overs(ov)));
    }

    #[test]
    fn stepping_wraps_between_overs() {
        assert_eq!(next_ball(12.4), 12.5);
        assert_eq!(next_ball(12.6), 13.1);
        assert_eq!(prev_ball(13.1), 12.6);
        assert_eq!(prev_ball(12.5), 12.4);
        assert_eq!(prev_ball(0.1), 0.1);
    }
}
