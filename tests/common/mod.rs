// tests/common/mod.rs
//
// Synthetic volby.cz pages: a district index plus one detail page per municipality.
#![allow(dead_code)]

use volby_scrape::config::options::ScrapeOptions;
use volby_scrape::core::MemoryFetcher;

pub const INDEX_URL: &str = "https://volby.cz/pls/ps2017nss/ps32?xjazyk=CZ&xkraj=2&xnumnuts=2101";

pub fn detail_href(code: &str) -> String {
    format!("ps311?xjazyk=CZ&amp;xkraj=2&amp;xobec={code}&amp;xvyber=2101")
}

pub fn detail_url(code: &str) -> String {
    format!("https://volby.cz/pls/ps2017nss/ps311?xjazyk=CZ&xkraj=2&xobec={code}&xvyber=2101")
}

pub struct Muni {
    pub code: &'static str,
    pub name: &'static str,
    pub registered: &'static str,
    pub envelopes: &'static str,
    pub valid: &'static str,
    pub votes: Vec<&'static str>,
}

pub const PARTIES: [&str; 5] = [
    "Občanská demokratická strana",
    "ANO 2011",
    "Česká pirátská strana",
    "Komunistická strana Čech a Moravy",
    "Svoboda a přímá demokracie",
];

/// First three parties go to segment t1, the rest to t2.
pub const SPLIT: usize = 3;

pub fn munis() -> Vec<Muni> {
    vec![
        Muni { code: "529303", name: "Benešov", registered: "13104", envelopes: "8485", valid: "8437",
               votes: vec!["1052", "2577", "917", "413", "589"] },
        Muni { code: "532568", name: "Bernartice", registered: "191", envelopes: "148", valid: "148",
               votes: vec!["4", "54", "6", "18", "17"] },
        Muni { code: "530743", name: "Bílkovice", registered: "170", envelopes: "121", valid: "118",
               votes: vec!["18", "30", "9", "3", "11"] },
        Muni { code: "532380", name: "Blažejovice", registered: "96", envelopes: "80", valid: "77",
               votes: vec!["12", "27", "2", "5", "4"] },
    ]
}

/// Index page; `segments` lists which municipalities (by position in `all`) sit in t1/t2/t3.
pub fn index_page(all: &[Muni], segments: &[&[usize]]) -> String {
    let mut html = String::from("<html><body><div id=\"publikace\"><h3>Okres: Benešov</h3>");
    for (si, members) in segments.iter().enumerate() {
        let seg = format!("t{}", si + 1);
        html.push_str(r#"<div class="t3"><table class="table"><tr><th id="t1sa1">Obec</th></tr>"#);
        for &i in *members {
            let m = &all[i];
            html.push_str(&format!(
                r#"<tr><td class="cislo" headers="{seg}sa1 {seg}sb1"><a href="{href}">{code}</a></td>
                   <td class="overflow_name" headers="{seg}sa1 {seg}sb2">{name}</td>
                   <td class="center" headers="{seg}sa2"><a href="ps311?x=1">X</a></td></tr>"#,
                href = detail_href(m.code),
                code = m.code,
                name = m.name,
            ));
        }
        html.push_str("</table></div>");
    }
    html.push_str("</div></body></html>");
    html
}

fn party_rows(seg: &str, names: &[&str], votes: &[&str], offset: usize) -> String {
    let mut s = String::new();
    for (i, (name, v)) in names.iter().zip(votes).enumerate() {
        s.push_str(&format!(
            r#"<tr><td class="cislo" headers="{seg}sa1 {seg}sb1">{n}</td>
               <td class="overflow_name" headers="{seg}sa1 {seg}sb2">{name}</td>
               <td class="cislo" headers="{seg}sa2 {seg}sb3">{v}</td>
               <td class="cislo" headers="{seg}sa2 {seg}sb4">1,00</td></tr>"#,
            n = offset + i + 1
        ));
    }
    s
}

/// Detail page for `m` with the standard party list.
pub fn detail_page(m: &Muni) -> String {
    detail_page_with(m, &PARTIES)
}

pub fn detail_page_with(m: &Muni, parties: &[&str]) -> String {
    let split = SPLIT.min(parties.len()).min(m.votes.len());
    let (n1, n2) = parties.split_at(split);
    let (v1, v2) = m.votes.split_at(split);
    format!(
        r#"<html><body><div id="publikace">
             <h3>Kraj: Středočeský kraj</h3>
             <h3>Okres: Benešov</h3>
             <h3>Obec: {name}</h3>
             <table id="ps311_t1" class="table">
               <tr><th colspan="3">Okrsky</th><th rowspan="2">Voliči v seznamu</th><th rowspan="2">Vydané obálky</th>
                   <th rowspan="2">Volební účast v %</th><th rowspan="2">Odevzdané obálky</th>
                   <th rowspan="2">Platné hlasy</th><th rowspan="2">% platných hlasů</th></tr>
               <tr><th>celkem</th><th>zpr.</th><th>v %</th></tr>
               <tr><td class="cislo">1</td><td class="cislo">1</td><td class="cislo">100,00</td>
                   <td class="cislo" headers="sa2">&nbsp;{registered}</td><td class="cislo" headers="sa3">{envelopes} </td>
                   <td class="cislo">64,75</td><td class="cislo">{envelopes}</td>
                   <td class="cislo" headers="sa6">{valid}</td><td class="cislo">99,43</td></tr>
             </table>
             <div class="t2_470"><table class="table">{t1}</table></div>
             <div class="t2_470"><table class="table">{t2}
               <tr><td class="hidden_td" headers="t2sa1 t2sb1">-</td><td class="hidden_td" headers="t2sa1 t2sb2">-</td>
                   <td class="hidden_td" headers="t2sa2 t2sb3">-</td><td class="hidden_td" headers="t2sa2 t2sb4">-</td></tr>
             </table></div>
           </div></body></html>"#,
        name = m.name,
        registered = m.registered,
        envelopes = m.envelopes,
        valid = m.valid,
        t1 = party_rows("t1", n1, v1, 0),
        t2 = party_rows("t2", n2, v2, split),
    )
}

/// Index with t1 = [0, 1], t2 = [2, 3], t3 = [1] (overlap), plus every detail page.
pub fn district() -> (MemoryFetcher, Vec<Muni>) {
    let all = munis();
    let mut f = MemoryFetcher::new().with_page(INDEX_URL, index_page(&all, &[&[0, 1], &[2, 3], &[1]]));
    for m in &all {
        f.insert(detail_url(m.code), detail_page(m));
    }
    (f, all)
}

pub fn options() -> ScrapeOptions {
    ScrapeOptions {
        index_url: INDEX_URL.to_string(),
        request_pause_ms: 0,
        ..ScrapeOptions::default()
    }
}
