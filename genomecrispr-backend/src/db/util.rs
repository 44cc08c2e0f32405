pub(super) trait AsIlike {
    fn as_ilike(&self) -> String;
}

impl AsIlike for &str {
    fn as_ilike(&self) -> String {
        format!("%{self}%")
    }
}

impl AsIlike for String {
    fn as_ilike(&self) -> String {
        self.as_str().as_ilike()
    }
}

pub(super) fn present_filters<'a>(
    filters: impl IntoIterator<Item = (&'static str, Option<&'a str>)>,
) -> impl Iterator<Item = (&'static str, &'a str)> {
    filters
        .into_iter()
        .filter_map(|(field, value)| value.filter(|v| !v.trim().is_empty()).map(|v| (field, v)))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn ilike_wraps_in_wildcards() {
        assert_eq!("12345".as_ilike(), "%12345%");
        assert_eq!(String::from("hek").as_ilike(), "%hek%");
    }

    #[test]
    fn blank_filters_are_skipped() {
        let filters = [
            ("screen.pubmed", Some("123")),
            ("screen.cas", Some("   ")),
            ("screen.cellline", None),
            ("screen.condition", Some("")),
        ];

        assert_eq!(
            present_filters(filters).collect::<Vec<_>>(),
            [("screen.pubmed", "123")]
        );
    }
}
