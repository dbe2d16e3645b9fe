// src/specs/district.rs
//
// District index page → ordered, deduplicated municipality links.
//
// Layout (volby.cz `ps32`): up to three parallel tables, segments t1/t2/t3.
// Each municipality row has an anchor cell
//   <td class="cislo" headers="t1sa1 t1sb1"><a href="ps311?...&xobec=529303&...">529303</a></td>
// and a name cell with headers "t1sa1 t1sb2".

use std::collections::HashSet;

use scraper::{ElementRef, Html};
use tracing::debug;
use url::Url;

use crate::config::consts::{ANCHOR_CLASS, CODE_PARAM_POSITION, INDEX_SEGMENTS, anchor_headers, name_headers};
use crate::core::html::{cells_by_headers, first_href, sibling_by_headers, text_normalized, text_of};
use crate::data::MunicipalityLink;
use crate::error::{Error, Result, Stage};

/// Walk segments in order, anchors in document order; first occurrence of a code wins.
/// `base` is the index page URL; hrefs are resolved against it.
pub fn discover(index: &Html, base: &Url) -> Result<Vec<MunicipalityLink>> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut links = Vec::new();

    for seg in INDEX_SEGMENTS {
        let anchors = cells_by_headers(index, &anchor_headers(seg), Some(ANCHOR_CLASS));
        debug!(segment = seg, anchors = anchors.len(), "index segment");

        for cell in anchors {
            let link = read_anchor(cell, seg, base)?;
            if seen.insert(link.code.clone()) {
                links.push(link);
            } else {
                debug!(code = %link.code, segment = seg, "duplicate municipality skipped");
            }
        }
    }

    if links.is_empty() {
        return Err(Error::structure(Stage::Discovery, base, "no municipality links found"));
    }
    Ok(links)
}

fn read_anchor(cell: ElementRef<'_>, seg: &str, base: &Url) -> Result<MunicipalityLink> {
    let (href, a) = first_href(cell).ok_or_else(|| {
        Error::structure(Stage::Discovery, base, format!("anchor cell in segment {seg} has no link"))
    })?;

    let url = base.join(href).map_err(|source| Error::InvalidUrl { url: s!(href), source })?;

    let text = text_of(a);
    let code = if text.is_empty() { code_from_url(url.as_str())? } else { text };

    let name = sibling_by_headers(cell, &name_headers(seg))
        .map(text_normalized)
        .filter(|n| !n.is_empty());

    Ok(MunicipalityLink { code, url, name })
}

/// Value of the third `=`-delimited parameter, up to the next `&`.
///
/// `".../vyber?xcode=1&x=2&zcode=600001"` → `"600001"`.
/// This is a positional convention of the site: parameter reordering goes unnoticed,
/// but a URL with too few `=` (or an empty value) is rejected.
pub fn code_from_url(url: &str) -> Result<String> {
    let value = url
        .split('=')
        .nth(CODE_PARAM_POSITION)
        .and_then(|v| v.split(['&', '#']).next())
        .unwrap_or_default();

    if value.is_empty() {
        return Err(Error::structure(
            Stage::Discovery,
            url,
            format!("cannot read municipality code: expected a value after '=' #{CODE_PARAM_POSITION}"),
        ));
    }
    Ok(s!(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::html::parse_page;

    fn base() -> Url {
        Url::parse("https://volby.cz/pls/ps2017nss/ps32?xjazyk=CZ&xkraj=2&xnumnuts=2101").unwrap()
    }

    fn row(seg: &str, code: &str, name: &str) -> String {
        format!(
            r#"<tr><td class="cislo" headers="{seg}sa1 {seg}sb1"><a href="ps311?xjazyk=CZ&amp;xkraj=2&amp;xobec={code}&amp;xvyber=2101">{code}</a></td>
               <td class="overflow_name" headers="{seg}sa1 {seg}sb2">{name}</td></tr>"#
        )
    }

    fn index(segments: &[Vec<String>]) -> String {
        let mut html = s!("<html><body>");
        for rows in segments {
            html.push_str("<table class=\"table\">");
            for r in rows { html.push_str(r); }
            html.push_str("</table>");
        }
        html.push_str("</body></html>");
        html
    }

    #[test]
    fn overlap_across_segments_is_deduplicated_in_order() {
        let doc = parse_page(&index(&[
            vec![row("t1", "529303", "Benešov")],
            vec![row("t2", "532568", "Bernartice")],
            vec![row("t3", "529303", "Benešov")],
        ]));
        let links = discover(&doc, &base()).unwrap();
        let codes: Vec<&str> = links.iter().map(|l| l.code.as_str()).collect();
        assert_eq!(codes, vec!["529303", "532568"]);
    }

    #[test]
    fn links_are_absolute_and_named() {
        let doc = parse_page(&index(&[vec![row("t1", "529303", "Benešov")]]));
        let links = discover(&doc, &base()).unwrap();
        assert_eq!(
            links[0].url.as_str(),
            "https://volby.cz/pls/ps2017nss/ps311?xjazyk=CZ&xkraj=2&xobec=529303&xvyber=2101"
        );
        assert_eq!(links[0].name.as_deref(), Some("Benešov"));
    }

    #[test]
    fn segment_order_beats_document_order() {
        // t2 table appears first in the document, t1 still comes first
        let doc = parse_page(&index(&[
            vec![row("t2", "2", "Two")],
            vec![row("t1", "1", "One")],
        ]));
        let codes: Vec<String> = discover(&doc, &base()).unwrap().into_iter().map(|l| l.code).collect();
        assert_eq!(codes, vec!["1", "2"]);
    }

    #[test]
    fn empty_link_text_falls_back_to_url() {
        let html = r#"<table><tr><td class="cislo" headers="t1sa1 t1sb1"><a href="ps311?xjazyk=CZ&amp;xkraj=2&amp;xobec=600001&amp;xvyber=2101"></a></td></tr></table>"#;
        let links = discover(&parse_page(html), &base()).unwrap();
        assert_eq!(links[0].code, "600001");
        assert_eq!(links[0].name, None);
    }

    #[test]
    fn anchor_without_link_is_structure_error() {
        let html = r#"<table><tr><td class="cislo" headers="t1sa1 t1sb1">529303</td></tr></table>"#;
        let err = discover(&parse_page(html), &base()).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Discovery));
    }

    #[test]
    fn no_anchors_is_structure_error() {
        let err = discover(&parse_page("<p>nothing here</p>"), &base()).unwrap_err();
        assert!(err.to_string().contains("no municipality links"));
    }

    #[test]
    fn code_from_third_equals() {
        assert_eq!(code_from_url("https://x/vyber?xcode=1&x=2&zcode=600001").unwrap(), "600001");
        assert_eq!(
            code_from_url("https://volby.cz/ps311?xjazyk=CZ&xkraj=2&xobec=529303&xvyber=2101").unwrap(),
            "529303"
        );
    }

    #[test]
    fn code_from_url_rejects_short_query() {
        let err = code_from_url("https://x/vyber?xcode=1&x=2").unwrap_err();
        assert!(matches!(err, Error::Structure { stage: Stage::Discovery, .. }));
        assert!(code_from_url("https://x/vyber?a=1&b=2&c=").is_err());
    }
}
