//! Benchmarks for rapid_summarizer

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rapid_summarizer::*;

/// Sample text for benchmarking
const SAMPLE_TEXT: &str = r#"
Machine learning is a subset of artificial intelligence that provides systems
the ability to automatically learn and improve from experience. Machine learning
focuses on the development of computer programs that can access data and learn
from it. The process of learning begins with observations or data, such as
examples, direct experience, or instruction. The primary aim is to allow computers
to learn automatically without human intervention.

Deep learning is a subset of machine learning that uses artificial neural networks
with representation learning. Deep learning has been applied to computer vision,
speech recognition, natural language processing, and drug design. Natural language
processing is a subfield of linguistics, computer science, and artificial
intelligence. Key applications include sentiment analysis, machine translation,
and text summarization.
"#;

fn english(k: usize) -> SummarizerConfig {
    SummarizerConfig::default()
        .with_language(Language::English)
        .with_num_sentences(k)
}

fn benchmark_segmentation(c: &mut Criterion) {
    let segmenter = SentenceSegmenter::new(Language::English);

    c.bench_function("segment_sample", |b| {
        b.iter(|| segmenter.segment(black_box(SAMPLE_TEXT)))
    });
}

fn benchmark_tfidf(c: &mut Criterion) {
    let segmenter = SentenceSegmenter::new(Language::English);
    let normalizer = TextNormalizer::new(Language::English);
    let sentences = segmenter.segment_texts(&SAMPLE_TEXT.repeat(5));
    let normalized = normalizer.normalize_all(&sentences);
    let vectorizer = TfidfVectorizer::default();

    c.bench_function("tfidf_similarity", |b| {
        b.iter(|| {
            vectorizer
                .fit_transform(black_box(&normalized))
                .map(|m| m.cosine_similarity())
        })
    });
}

fn benchmark_pagerank(c: &mut Criterion) {
    let mut group = c.benchmark_group("pagerank_by_nodes");
    for nodes in [10usize, 50, 200].iter() {
        let matrix = SimilarityMatrix::from_pairwise(*nodes, |i, j| {
            if i == j {
                1.0
            } else {
                ((i * 7 + j * 13) % 10) as f64 / 10.0
            }
        });
        let graph = CsrGraph::from_builder(&GraphBuilder::from_similarity(&matrix));
        let pr = StandardPageRank::new();

        group.bench_with_input(BenchmarkId::from_parameter(nodes), &graph, |b, graph| {
            b.iter(|| pr.run(black_box(graph)))
        });
    }
    group.finish();
}

fn benchmark_summarize(c: &mut Criterion) {
    let summarizer = match Summarizer::lexical(english(3)) {
        Ok(s) => s,
        Err(e) => panic!("invalid benchmark config: {}", e),
    };

    let mut group = c.benchmark_group("summarize_by_size");
    for size in [1, 5, 20].iter() {
        let text = SAMPLE_TEXT.repeat(*size);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| summarizer.summarize(black_box(text)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_segmentation,
    benchmark_tfidf,
    benchmark_pagerank,
    benchmark_summarize
);
criterion_main!(benches);
