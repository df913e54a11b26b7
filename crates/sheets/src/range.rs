//! A1 range addressing for value operations.

use pipeline::TabName;

/// Builds an A1 range on `tab`, e.g. `'Bug Tracker'!A1:ZZ`.
///
/// The tab name is always single-quoted; embedded quotes are doubled.
pub fn a1_range(tab: &TabName, cells: &str) -> String {
    format!("'{}'!{}", tab.as_str().replace('\'', "''"), cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_tab_names() {
        let tab = TabName::new("Bug Tracker").unwrap();
        assert_eq!(a1_range(&tab, "A1:ZZ"), "'Bug Tracker'!A1:ZZ");
    }

    #[test]
    fn doubles_embedded_quotes() {
        let tab = TabName::new("Ops' Bugs").unwrap();
        assert_eq!(a1_range(&tab, "A1"), "'Ops'' Bugs'!A1");
    }

    #[test]
    fn keeps_padding_of_service_titles() {
        let tab = TabName::from_title(" Bugs ").unwrap();
        assert_eq!(a1_range(&tab, "A1"), "' Bugs '!A1");
    }
}
