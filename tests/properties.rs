/// Property tests for the catalog parser and the document indexer
///
/// Inputs are scripts assembled from fragments of the dialect, so most of them
/// hit real rules rather than being rejected on the first character.

use quickcheck::{Arbitrary, Gen, QuickCheck, TestResult};
use script_language_server::catalog::Catalog;
use script_language_server::index::DocumentIndex;
use script_language_server::lsp::features::{complete, hover, signature_help};
use tower_lsp::lsp_types::Position;

const FRAGMENTS: &[&str] = &[
    "class Vector:",
    "    x: float",
    "    \"\"\"Horizontal\"\"\"",
    "    def dot(self, other):",
    "        \"\"\"Dot product.",
    "        \"\"\"",
    "def clamp(v, lo, hi) -> float:",
    "    '''Limits.'''",
    "screen = Screen()",
    "items = []",
    "lookup = {}",
    "lookup: dict",
    "seen = set()",
    "name = 'x'",
    "items.",
    "clamp(1, ",
    "Vector.x",
    "",
    "    ",
    "\"\"\"",
    "é = ü(",
    "def (",
];

#[derive(Debug, Clone)]
struct Script(String);

impl Arbitrary for Script {
    fn arbitrary(g: &mut Gen) -> Self {
        let count = usize::arbitrary(g) % 24;
        let lines: Vec<String> = (0..count)
            .map(|_| {
                if bool::arbitrary(g) {
                    g.choose(FRAGMENTS).copied().unwrap_or_default().to_string()
                } else {
                    String::arbitrary(g).replace('\n', " ")
                }
            })
            .collect();
        Script(lines.join("\n"))
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let lines: Vec<String> = self.0.lines().map(str::to_string).collect();
        Box::new((0..lines.len()).map(move |skip| {
            let kept: Vec<&str> = lines
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != skip)
                .map(|(_, l)| l.as_str())
                .collect();
            Script(kept.join("\n"))
        }))
    }
}

#[test]
fn test_property_catalog_parse_is_deterministic() {
    fn prop(script: Script) -> TestResult {
        let first = Catalog::parse(&script.0);
        let second = Catalog::parse(&script.0);
        if first != second {
            return TestResult::failed();
        }
        TestResult::passed()
    }

    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(Script) -> TestResult);
}

#[test]
fn test_property_index_rebuild_is_idempotent() {
    fn prop(script: Script) -> TestResult {
        TestResult::from_bool(DocumentIndex::build(&script.0) == DocumentIndex::build(&script.0))
    }

    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(Script) -> TestResult);
}

#[test]
fn test_property_queries_never_panic() {
    fn prop(script: Script, line: u8, character: u8) -> TestResult {
        let catalog = Catalog::parse(&script.0);
        let index = DocumentIndex::build(&script.0);
        let position = Position::new(u32::from(line % 32), u32::from(character));

        let _ = complete(&catalog, &index, &script.0, position);
        let _ = hover(&catalog, &script.0, position);
        let _ = signature_help(&catalog, &index, &script.0, position);
        TestResult::passed()
    }

    QuickCheck::new()
        .tests(300)
        .quickcheck(prop as fn(Script, u8, u8) -> TestResult);
}
