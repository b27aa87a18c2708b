use crate::parsers::ParserType;
use crate::parsers::feed::extract_titles;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_titles_in_order() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Cricinfo Live Scores</title>
    <item>
      <title>Australia 245/6 * v England</title>
      <link>http://www.cricinfo.com/ci/engine/match/1.html</link>
    </item>
    <item>
      <title><![CDATA[India v South Africa 180/3 *]]></title>
    </item>
    <item>
      <description>no title here</description>
    </item>
    <item>
      <title>Pakistan &amp; Friends XI v Kenya</title>
    </item>
  </channel>
</rss>"#;

        let titles = extract_titles(xml).unwrap();
        assert_eq!(
            titles,
            vec![
                "Australia 245/6 * v England".to_string(),
                "India v South Africa 180/3 *".to_string(),
                "Pakistan & Friends XI v Kenya".to_string(),
            ]
        );
    }

    #[test]
    fn test_nested_titles_are_ignored() {
        let xml = "<rss><channel><item>\
            <title>Top level</title>\
            <media><title>Nested</title></media>\
            </item></channel></rss>";

        assert_eq!(extract_titles(xml).unwrap(), vec!["Top level".to_string()]);
    }

    #[test]
    fn test_no_items() {
        let xml = "<rss><channel><title>Empty feed</title></channel></rss>";
        assert!(extract_titles(xml).unwrap().is_empty());
        assert!(extract_titles("").unwrap().is_empty());
    }

    #[test]
    fn test_mismatched_tags_are_an_error() {
        let xml = "<rss><channel><item><title>Broken</item></channel></rss>";
        assert!(extract_titles(xml).is_err());
    }

    #[test]
    fn test_parser_type_from_url() {
        let types = [
            ("https://static.cricinfo.com/rss/livescores.xml", ParserType::Feed),
            ("https://example.org/feed.rss?x=1", ParserType::Feed),
            ("https://www.espncricinfo.com/live-cricket-score", ParserType::Html),
            ("https://example.org/page.html", ParserType::Html),
        ];

        for (url, expected) in types {
            assert_eq!(ParserType::from_url(url), expected, "URL '{}'", url);
        }
    }
}
