// src/scrape.rs
use std::{
    thread, time::Duration,
    sync::{ mpsc, atomic::{ AtomicBool, AtomicUsize, Ordering }}
};

use scraper::Html;
use tracing::{debug, error, info};
use url::Url;

use crate::{
    config::consts::JITTER_MS,
    config::options::ScrapeOptions,
    core::{ html, Fetch },
    data::{ MunicipalityLink, MunicipalityRecord, ResultTable, Schema },
    error::{ Error, Result, Stage },
    progress::Progress,
    specs::{ district, municipality },
};

/// Fetch the district index at `opts.index_url` and build the full table.
pub fn assemble<F: Fetch + ?Sized>(
    opts: &ScrapeOptions,
    fetcher: &F,
    mut progress: Option<&mut dyn Progress>,
) -> Result<ResultTable> {
    let index_url = Url::parse(opts.index_url.trim())
        .map_err(|source| Error::InvalidUrl { url: opts.index_url.clone(), source })?;

    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("Reading district index {index_url}"));
    }
    let index = load_page(fetcher, &index_url)?;
    assemble_from_index(&index, &index_url, fetcher, opts, progress)
}

/// Build the table from an already-parsed index page.
///
/// The first link is fetched alone: its page fixes the schema and yields the first row.
/// Every other link is then extracted against that schema, sequentially or by a worker
/// pool (`opts.workers`). Rows always come out in discovery order. Any error aborts the
/// whole run; no partial table is returned.
pub fn assemble_from_index<F: Fetch + ?Sized>(
    index: &Html,
    index_url: &Url,
    fetcher: &F,
    opts: &ScrapeOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<ResultTable> {
    let result = run(index, index_url, fetcher, opts, &mut progress);

    if let Err(e) = &result {
        error!(error = %e, "scrape aborted");
    }
    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    result
}

fn run<F: Fetch + ?Sized>(
    index: &Html,
    index_url: &Url,
    fetcher: &F,
    opts: &ScrapeOptions,
    progress: &mut Option<&mut dyn Progress>,
) -> Result<ResultTable> {
    let links = district::discover(index, index_url)?;
    info!(district = %index_url, municipalities = links.len(), "links discovered");

    if let Some(p) = progress.as_deref_mut() {
        p.begin(links.len());
    }

    // discover() never returns an empty list
    let Some((first, rest)) = links.split_first() else {
        return Err(Error::structure(Stage::Discovery, index_url, "no municipality links found"));
    };

    let (schema, first_record) = {
        let page = load_page(fetcher, &first.url)?;
        let schema = municipality::resolve_schema(&page, first)?;
        let record = municipality::extract(&page, first, &schema)?;
        (schema, record)
    };
    info!(parties = schema.party_count(), from = %first.code, "schema fixed");
    report(progress, &first_record);

    let mut records = Vec::with_capacity(links.len());
    records.push(first_record);

    let workers = opts.workers().min(rest.len()).max(1);
    if workers == 1 {
        records.extend(collect_sequential(fetcher, rest, &schema, opts, progress)?);
    } else {
        records.extend(collect_parallel(fetcher, rest, &schema, opts, workers, progress)?);
    }

    ResultTable::from_records(&schema, links.into_iter().zip(records))
}

fn collect_sequential<F: Fetch + ?Sized>(
    fetcher: &F,
    links: &[MunicipalityLink],
    schema: &Schema,
    opts: &ScrapeOptions,
    progress: &mut Option<&mut dyn Progress>,
) -> Result<Vec<MunicipalityRecord>> {
    let mut out = Vec::with_capacity(links.len());
    for link in links {
        pause(opts.request_pause_ms);
        let record = process(fetcher, link, schema)?;
        report(progress, &record);
        out.push(record);
    }
    Ok(out)
}

/// Worker pool over `links`. Results land in their discovery slot; the first error
/// stops every worker from taking new links.
fn collect_parallel<F: Fetch + ?Sized>(
    fetcher: &F,
    links: &[MunicipalityLink],
    schema: &Schema,
    opts: &ScrapeOptions,
    workers: usize,
    progress: &mut Option<&mut dyn Progress>,
) -> Result<Vec<MunicipalityRecord>> {
    debug!(workers, links = links.len(), "parallel extraction");

    let counter = AtomicUsize::new(0);
    let abort = AtomicBool::new(false);
    let (res_tx, res_rx) = mpsc::channel::<(usize, Result<MunicipalityRecord>)>();
    let pause_ms = opts.request_pause_ms;

    let mut slots: Vec<Option<MunicipalityRecord>> = (0..links.len()).map(|_| None).collect();
    let mut failure: Option<Error> = None;

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = res_tx.clone();
            let (counter, abort) = (&counter, &abort);

            scope.spawn(move || {
                loop {
                    if abort.load(Ordering::Relaxed) {
                        break;
                    }
                    let i = counter.fetch_add(1, Ordering::Relaxed);
                    if i >= links.len() {
                        break;
                    }
                    let result = process(fetcher, &links[i], schema);
                    if tx.send((i, result)).is_err() {
                        break;
                    }
                    let jitter = (i as u64) % JITTER_MS;
                    pause(pause_ms + jitter); // be polite
                }
            });
        }
        drop(res_tx); // main thread is sole receiver now

        for (i, result) in res_rx {
            match result {
                Ok(record) => {
                    report(progress, &record);
                    slots[i] = Some(record);
                }
                Err(e) => {
                    abort.store(true, Ordering::Relaxed);
                    failure = Some(e);
                    break;
                }
            }
        }
    });

    if let Some(e) = failure {
        return Err(e);
    }
    Ok(slots.into_iter().flatten().collect())
}

fn process<F: Fetch + ?Sized>(fetcher: &F, link: &MunicipalityLink, schema: &Schema) -> Result<MunicipalityRecord> {
    let page = load_page(fetcher, &link.url)?;
    municipality::extract(&page, link, schema)
}

fn load_page<F: Fetch + ?Sized>(fetcher: &F, url: &Url) -> Result<Html> {
    let text = fetcher.fetch(url).map_err(|e| Error::fetch(url, e))?;
    Ok(html::parse_page(&text))
}

fn report(progress: &mut Option<&mut dyn Progress>, record: &MunicipalityRecord) {
    info!(code = %record.code, name = %record.location_name, "municipality scraped");
    if let Some(p) = progress.as_deref_mut() {
        p.item_done(&record.code, &record.location_name);
    }
}

fn pause(ms: u64) {
    if ms > 0 {
        thread::sleep(Duration::from_millis(ms));
    }
}
