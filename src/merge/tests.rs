//! Tests for the merge module

use super::*;
use crate::dom::{parse_selector, HtmlDocument};
use crate::state::{count_items, PaginationState};
use crate::types::MergeMode;
use pretty_assertions::assert_eq;

fn state(targets: &[&str], mode: MergeMode, filter: Option<&str>) -> PaginationState {
    PaginationState {
        current_page: 1,
        tracks_page: true,
        has_next_page: true,
        mode,
        target_selectors: targets.iter().map(|s| (*s).to_string()).collect(),
        append_filter: filter.map(String::from),
        ..PaginationState::default()
    }
}

fn inner(doc: &HtmlDocument, selector: &str) -> String {
    doc.inner_html_of(&parse_selector(selector).unwrap()).unwrap()
}

// ============================================================================
// Append Tests
// ============================================================================

#[test]
fn test_append_with_filter_moves_matching_children_in_order() {
    let mut live = HtmlDocument::parse(r#"<div id="grid"><div class="product">0</div></div>"#);
    let mut remote = HtmlDocument::parse(
        r#"<div id="grid"><div class="product">1</div><script>track()</script><div class="product">2</div></div>"#,
    );
    let mut state = state(&["#grid"], MergeMode::Append, Some(".product"));
    state.items_merged = 1;

    let report = DocumentMerger::new().merge(&mut live, &mut remote, &mut state);

    assert_eq!(report.appended(), 2);
    assert_eq!(state.items_merged, 3);
    assert_eq!(
        inner(&live, "#grid"),
        r#"<div class="product">0</div><div class="product">1</div><div class="product">2</div>"#
    );
    // moved, not copied: only the filtered-out script stays behind
    assert_eq!(inner(&remote, "#grid"), "<script>track()</script>");
}

#[test]
fn test_append_without_filter_moves_all_element_children() {
    let mut live = HtmlDocument::parse(r#"<ul id="l"></ul>"#);
    let mut remote = HtmlDocument::parse("<ul id=\"l\">\n<li>a</li>\n<li>b</li>\n</ul>");
    let mut state = state(&["#l"], MergeMode::Append, None);

    let report = DocumentMerger::new().merge(&mut live, &mut remote, &mut state);

    assert_eq!(
        report.regions,
        vec![RegionOutcome::Appended {
            selector: "#l".to_string(),
            count: 2
        }]
    );
    assert_eq!(inner(&live, "#l"), "<li>a</li><li>b</li>");
    assert_eq!(state.items_merged, 2);
}

#[test]
fn test_append_invalid_filter_skips_region() {
    let mut live = HtmlDocument::parse(r#"<ul id="l"></ul>"#);
    let mut remote = HtmlDocument::parse(r#"<ul id="l"><li>a</li></ul>"#);
    let mut state = state(&["#l"], MergeMode::Append, Some("li["));

    let report = DocumentMerger::new().merge(&mut live, &mut remote, &mut state);

    assert_eq!(report.skipped(), 1);
    assert_eq!(inner(&live, "#l"), "");
    assert_eq!(state.current_page, 2);
}

// ============================================================================
// Swap Tests
// ============================================================================

#[test]
fn test_swap_replaces_content_with_copy() {
    let mut live = HtmlDocument::parse(r#"<nav id="pager"><a>1</a><a>2</a><a>3</a></nav>"#);
    let mut remote = HtmlDocument::parse(r#"<nav id="pager"><a>2</a> <b>next</b></nav>"#);
    let mut state = state(&["#pager"], MergeMode::Swap, None);
    state.items_merged = 3;

    let report = DocumentMerger::new().merge(&mut live, &mut remote, &mut state);

    assert_eq!(
        report.regions,
        vec![RegionOutcome::Swapped {
            selector: "#pager".to_string(),
            count: 2
        }]
    );
    assert_eq!(inner(&live, "#pager"), "<a>2</a> <b>next</b>");
    assert_eq!(inner(&remote, "#pager"), "<a>2</a> <b>next</b>");
    assert_eq!(state.items_merged, 2);
}

#[test]
fn test_swap_is_idempotent() {
    let mut live = HtmlDocument::parse(r#"<div id="r"><p>old</p></div>"#);
    let remote_markup = r#"<div id="r"><p>new</p><p>content</p></div>"#;
    let mut state = state(&["#r"], MergeMode::Swap, None);
    let merger = DocumentMerger::new();

    merger.merge(&mut live, &mut HtmlDocument::parse(remote_markup), &mut state);
    let after_first = live.html();
    let items_first = state.items_merged;

    merger.merge(&mut live, &mut HtmlDocument::parse(remote_markup), &mut state);

    assert_eq!(live.html(), after_first);
    assert_eq!(state.items_merged, items_first);
}

#[test]
fn test_per_region_swap_override_beats_global_append() {
    let mut live = HtmlDocument::parse(
        r#"<ul id="list"><li>1</li></ul><nav id="pager" load-more-mode="swap"><a>p1</a></nav>"#,
    );
    let mut remote = HtmlDocument::parse(
        r#"<ul id="list"><li>2</li></ul><nav id="pager"><a>p2</a></nav>"#,
    );
    let mut state = state(&["#list", "#pager"], MergeMode::Append, None);
    state.items_merged = 2;

    let report = DocumentMerger::new().merge(&mut live, &mut remote, &mut state);

    assert!(matches!(report.regions[0], RegionOutcome::Appended { count: 1, .. }));
    assert!(matches!(report.regions[1], RegionOutcome::Swapped { count: 1, .. }));
    assert_eq!(inner(&live, "#list"), "<li>1</li><li>2</li>");
    assert_eq!(inner(&live, "#pager"), "<a>p2</a>");
    assert_eq!(state.items_merged, 3);
    assert_eq!(
        state.items_merged,
        count_items(&live, &state.target_selectors)
    );
}

#[test]
fn test_explicit_append_override_falls_through_to_global_swap() {
    let mut live = HtmlDocument::parse(r#"<ul id="l" load-more-mode="append"><li>1</li></ul>"#);
    let mut remote = HtmlDocument::parse(r#"<ul id="l"><li>2</li></ul>"#);
    let mut state = state(&["#l"], MergeMode::Swap, None);

    DocumentMerger::new().merge(&mut live, &mut remote, &mut state);

    assert_eq!(inner(&live, "#l"), "<li>2</li>");
}

// ============================================================================
// Partial Failure Tests
// ============================================================================

#[test]
fn test_missing_regions_are_skipped_independently() {
    let mut live = HtmlDocument::parse(r#"<ul id="a"></ul><ul id="only-live"></ul>"#);
    let mut remote = HtmlDocument::parse(
        r#"<ul id="a"><li>x</li></ul><ul id="only-remote"><li>y</li></ul>"#,
    );
    let mut state = state(
        &["#only-remote", "#a", "#only-live", "ul["],
        MergeMode::Append,
        None,
    );

    let report = DocumentMerger::new().merge(&mut live, &mut remote, &mut state);

    assert_eq!(
        report.regions,
        vec![
            RegionOutcome::Skipped {
                selector: "#only-remote".to_string(),
                reason: SkipReason::MissingDestination
            },
            RegionOutcome::Appended {
                selector: "#a".to_string(),
                count: 1
            },
            RegionOutcome::Skipped {
                selector: "#only-live".to_string(),
                reason: SkipReason::MissingSource
            },
            RegionOutcome::Skipped {
                selector: "ul[".to_string(),
                reason: SkipReason::InvalidSelector
            },
        ]
    );
    assert_eq!(inner(&live, "#a"), "<li>x</li>");
    assert_eq!(state.items_merged, 1);
}

// ============================================================================
// Page Advance and Indicator Tests
// ============================================================================

#[test]
fn test_page_advances_once_regardless_of_target_count() {
    for targets in [vec![], vec!["#a"], vec!["#a", "#b", "#c"]] {
        let mut live = HtmlDocument::parse(r#"<ul id="a"></ul><ul id="b"></ul>"#);
        let mut remote = HtmlDocument::parse(r#"<ul id="a"><li>1</li></ul>"#);
        let mut state = state(&targets, MergeMode::Append, None);

        DocumentMerger::new().merge(&mut live, &mut remote, &mut state);
        assert_eq!(state.current_page, 2, "targets: {targets:?}");
    }
}

#[test]
fn test_indicator_overwrites_has_next_page() {
    let mut live = HtmlDocument::parse("<main></main>");
    let mut remote = HtmlDocument::parse(r#"<load-more has-next-page="false"></load-more>"#);
    let mut state = state(&[], MergeMode::Append, None);

    let report = DocumentMerger::new().merge(&mut live, &mut remote, &mut state);

    assert!(report.indicator_found);
    assert!(!state.has_next_page);
}

#[test]
fn test_missing_indicator_leaves_has_next_page_unchanged() {
    for remote_markup in ["<main></main>", "<load-more></load-more>"] {
        let mut live = HtmlDocument::parse("<main></main>");
        let mut remote = HtmlDocument::parse(remote_markup);
        let mut state = state(&[], MergeMode::Append, None);

        let report = DocumentMerger::new().merge(&mut live, &mut remote, &mut state);

        assert!(!report.indicator_found);
        assert!(state.has_next_page);
    }
}

#[test]
fn test_custom_indicator_selector() {
    let mut live = HtmlDocument::parse("<main></main>");
    let mut remote =
        HtmlDocument::parse(r#"<button class="more" has-next-page="false"></button>"#);
    let mut state = state(&[], MergeMode::Append, None);

    let merger = DocumentMerger::with_indicator("button.more").unwrap();
    merger.merge(&mut live, &mut remote, &mut state);

    assert!(!state.has_next_page);
    assert!(DocumentMerger::with_indicator("button[").is_err());
}
