use actix_web::{http::header::ContentType, HttpResponse};
use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounterVec, Opts, TextEncoder};

static VOTE_CACHE_LOOKUPS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    let counter = IntCounterVec::new(
        Opts::new(
            "favorite_vote_cache_lookups_total",
            "Vote tally cache lookups by result (hit, miss, error)",
        ),
        &["result"],
    )
    .expect("failed to create favorite_vote_cache_lookups_total");
    prometheus::default_registry()
        .register(Box::new(counter.clone()))
        .expect("failed to register favorite_vote_cache_lookups_total");
    counter
});

static VOTE_CACHE_WRITES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    let counter = IntCounterVec::new(
        Opts::new(
            "favorite_vote_cache_writes_total",
            "Vote tally cache write-backs by result (ok, error)",
        ),
        &["result"],
    )
    .expect("failed to create favorite_vote_cache_writes_total");
    prometheus::default_registry()
        .register(Box::new(counter.clone()))
        .expect("failed to register favorite_vote_cache_writes_total");
    counter
});

static FAVORITE_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    let counter = IntCounterVec::new(
        Opts::new(
            "favorite_requests_total",
            "Favorite listing requests by outcome",
        ),
        &["outcome"],
    )
    .expect("failed to create favorite_requests_total");
    prometheus::default_registry()
        .register(Box::new(counter.clone()))
        .expect("failed to register favorite_requests_total");
    counter
});

pub fn record_cache_hits(count: usize) {
    VOTE_CACHE_LOOKUPS_TOTAL
        .with_label_values(&["hit"])
        .inc_by(count as u64);
}

pub fn record_cache_misses(count: usize) {
    VOTE_CACHE_LOOKUPS_TOTAL
        .with_label_values(&["miss"])
        .inc_by(count as u64);
}

pub fn record_cache_lookup_error() {
    VOTE_CACHE_LOOKUPS_TOTAL.with_label_values(&["error"]).inc();
}

pub fn record_cache_write(ok: bool) {
    let result = if ok { "ok" } else { "error" };
    VOTE_CACHE_WRITES_TOTAL.with_label_values(&[result]).inc();
}

/// `outcome` is "success" or the error kind
pub fn record_request(outcome: &str) {
    FAVORITE_REQUESTS_TOTAL.with_label_values(&[outcome]).inc();
}

pub async fn metrics_handler() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        return HttpResponse::InternalServerError().body(err.to_string());
    }

    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(buffer)
}
