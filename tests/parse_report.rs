use mgbparser_rs::sighits::check_rank_consistency;
use mgbparser_rs::{parse, parse_report_file, ParseError, Strand};

const FIXTURE: &str = "tests/data/clusterblast_output.txt";

#[test]
fn parses_fixture_report() {
    let report = parse_report_file(FIXTURE).expect("Parsing fixture failed");

    assert_eq!(report.query.source_filename, "NRPS_cluster.gbk");
    assert_eq!(report.query.rows.len(), 3);
    assert_eq!(report.query.rows[2].strand, Strand::Minus);

    let ids: Vec<&str> = report.significant_hits.rows.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["NC_003888.3_c12", "CP000001_c3", "WP_012345_c1"]);
    assert_eq!(report.hits.len(), 3);
    assert!(check_rank_consistency(&report.significant_hits, &report.hits).is_empty());

    let first = &report.hits[0];
    assert_eq!(first.id, "NC_003888.3_c12");
    assert_eq!(first.protein_count, 3);
    assert_eq!(first.location_rows[1].comment, "TE domain");
    assert_eq!(first.blast_rows.len(), 3);
    assert_eq!(first.span.dominant_strand, Strand::Plus);
    assert_eq!(first.span.operon_start, 3551000);
    assert_eq!(first.span.operon_end, 3556100);
    assert_eq!(first.span.operon_length, 5100);
    assert_eq!(first.span.start_locus, "SCO3230");
    assert_eq!(first.span.end_locus, "SCO3232");
}

#[test]
fn minus_strand_span_uses_start_for_both_loci() {
    let report = parse_report_file(FIXTURE).expect("Parsing fixture failed");
    let hit = &report.hits[1];

    assert_eq!(hit.source_description, "Streptomyces sp. ATCC 700974 chromosome");
    assert_eq!(hit.cumulative_bitscore, 1488.5);
    assert_eq!(hit.span.dominant_strand, Strand::Minus);
    // the largest Start belongs to the lone plus-strand gene and is still taken
    assert_eq!(hit.span.operon_start, 816000);
    assert_eq!(hit.span.start_locus, "STR_0411");
    assert_eq!(hit.span.operon_end, 808900);
    assert_eq!(hit.span.end_locus, "STR_0409");
    assert_eq!(hit.span.operon_length, 7100);
}

#[test]
fn strand_tie_resolves_to_first_gene() {
    let report = parse_report_file(FIXTURE).expect("Parsing fixture failed");
    let hit = &report.hits[2];

    assert_eq!(hit.span.dominant_strand, Strand::Plus);
    assert_eq!(hit.span.operon_start, 1000);
    assert_eq!(hit.span.operon_end, 2600);
    assert_eq!(hit.span.end_locus, "pks2");
    assert_eq!(
        hit.get_coords_line(),
        "3\tWP_012345_c1\tpks1\tpks2\t1000\t2600\t+\tPutative polyketide synthase cluster"
    );
}

#[test]
fn missing_details_section_fails_whole_report() {
    let text = std::fs::read_to_string(FIXTURE).expect("read fixture");
    let truncated = text.replace("Details:", "Detail");

    match parse(&truncated) {
        Err(ParseError::SectionNotFound { section }) => assert_eq!(section, "significant hits"),
        other => panic!("unexpected result: {other:?}"),
    }
}
