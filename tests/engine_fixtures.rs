//! End-to-end checks of the analysis engine on realistic doubts.

mod util;

use doubtsift::analysis::{ContentAnalyzer, Corpus, CorpusEntry};

#[test]
fn data_structures_question_is_tagged_dsa_first()
{
    let analyzer = ContentAnalyzer::builtin();
    let tags = analyzer.predict_tags(
        "I love arrays, linked lists and recursion algorithms",
        "explain sorting and dynamic programming complexity",
    );

    assert_eq!(tags, vec!["dsa", "aptitude", "dbms", "machine-learning", "oop"]);
}

#[test]
fn tag_scores_show_the_dsa_margin()
{
    let analyzer = ContentAnalyzer::builtin();
    let scores = analyzer.tag_scores(
        "I love arrays, linked lists and recursion algorithms",
        "explain sorting and dynamic programming complexity",
    );

    assert_eq!(scores[0].tag, "dsa");
    assert_eq!(scores[0].score, 40.0);
    // git scores but falls outside the top five
    assert!(scores.iter().any(|s| s.tag == "git" && s.score == 2.5));
}

#[test]
fn git_question_is_tagged_git()
{
    let tags = ContentAnalyzer::builtin()
        .predict_tags("Git merge conflicts", "How to resolve merge conflicts after git pull");
    assert_eq!(tags[0], "git");
}

#[test]
fn binary_search_tree_rephrasing_is_a_candidate()
{
    let analyzer = ContentAnalyzer::builtin();
    let score = analyzer.similarity(
        "Binary search trees Explain binary search trees and their traversal",
        "What is a binary search tree Explain the idea",
    );

    assert!(score > 0.3, "score {score}");
    assert!((score - 0.5976).abs() < 1e-4);
}

#[test]
fn near_duplicate_stands_out_from_unrelated_corpus()
{
    let analyzer = ContentAnalyzer::builtin();
    let corpus = util::quicksort_corpus();
    let scan = analyzer.full_scan(&corpus);

    let got = analyzer.rank_candidates("How does quicksort partition an array around a pivot element", &scan);

    assert_eq!(got.len(), 1);
    assert_eq!(got[0].item_id, "q1");
    assert!((got[0].score - 0.8911).abs() < 1e-4);
}

#[test]
fn candidates_are_capped_at_three_best_first()
{
    let analyzer = ContentAnalyzer::builtin();
    let corpus = Corpus::new(
        (0..6)
            .map(|i| {
                let extra = "padding ".repeat(i);
                CorpusEntry::new(format!("c{i}"), "binary heap insertion", format!("priority queue {extra}"))
            })
            .collect(),
    )
    .unwrap();

    let got = analyzer.rank_candidates("binary heap insertion priority queue", &analyzer.full_scan(&corpus));

    let ids: Vec<_> = got.iter().map(|c| c.item_id.as_str()).collect();
    assert_eq!(ids, vec!["c0", "c1", "c2"]);
    assert!(got.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn empty_corpus_yields_nothing()
{
    let analyzer = ContentAnalyzer::builtin();
    let corpus = Corpus::default();
    assert!(analyzer.rank_candidates("anything at all", &analyzer.full_scan(&corpus)).is_empty());
}

#[test]
fn stopword_only_text_has_no_keywords_and_zero_similarity()
{
    let analyzer = ContentAnalyzer::builtin();
    assert!(analyzer.keywords("what is it? is it a an the").is_empty());
    assert_eq!(analyzer.similarity("what is it", "what is it"), 0.0);
}

#[test]
fn keywords_follow_frequency_then_first_seen()
{
    let kws = ContentAnalyzer::builtin()
        .keywords("How do I reverse a linked list Iterative reversal of a singly linked list in place");
    assert_eq!(kws, vec!["linked", "list", "reverse", "iterative", "reversal", "singly", "place"]);
}
