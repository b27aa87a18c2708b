use quick_xml::Reader;
use quick_xml::events::Event;

/// Returns the `<title>` text of every `<item>` in an RSS document, in document order.
///
/// Only titles that are direct children of an item count; the channel title is ignored.
pub fn extract_titles(xml: &str) -> Result<Vec<String>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut titles = Vec::new();
    let mut buf = Vec::new();

    let mut depth = 0usize;
    let mut item_depth: Option<usize> = None;
    let mut title: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                depth += 1;
                match e.local_name().as_ref() {
                    b"item" if item_depth.is_none() => item_depth = Some(depth),
                    b"title" if item_depth == Some(depth - 1) => title = Some(String::new()),
                    _ => {}
                }
            }
            Event::Empty(e) => {
                if e.local_name().as_ref() == b"title" && item_depth == Some(depth) {
                    titles.push(String::new());
                }
            }
            Event::Text(e) => {
                if let Some(current) = title.as_mut() {
                    current.push_str(&e.unescape()?);
                }
            }
            Event::CData(e) => {
                if let Some(current) = title.as_mut() {
                    current.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Event::End(e) => {
                match e.local_name().as_ref() {
                    b"title" => {
                        if let Some(done) = title.take() {
                            titles.push(done.trim().to_string());
                        }
                    }
                    b"item" if item_depth == Some(depth) => item_depth = None,
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    ::log::debug!("Feed parser found {} item titles", titles.len());
    Ok(titles)
}
