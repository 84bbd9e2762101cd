use crate::data::NameLexicon;

/// Display label for a climb, e.g. `"Col 1800m"`.
///
/// The word is chosen from the peak elevation first, then from how steep or
/// long the climb is; the number is the peak rounded to the nearest 100 m.
pub fn climb_name(
    peak_elevation: f64,
    length_km: f64,
    average_gradient: f64,
    lexicon: &NameLexicon,
) -> String {
    let word = if peak_elevation > 1500.0 {
        &lexicon.high_pass
    } else if peak_elevation > 1000.0 {
        &lexicon.high_hill
    } else if average_gradient > 10.0 {
        &lexicon.steep_wall
    } else if length_km > 10.0 {
        &lexicon.long_climb
    } else {
        &lexicon.default
    };
    let rounded = (peak_elevation / 100.0).round() * 100.0;
    format!("{word} {rounded:.0}m")
}
