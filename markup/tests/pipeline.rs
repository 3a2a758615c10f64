use chrono::NaiveDate;
use mango_core::{FlagDeclaration, FlagKind, ManualSource};
use mango_markup::{
    BuildConfig, BuildError, ManualBuilder, NodeKind, Parser, Tokenizer, build_all,
};

const DESCRIPTION: &str = "\
frob - frobnicate files in place

Description
-----------
Frob reads every *file* given on the command line and
frobnicates it.

    > frob -n a.txt b.txt

Exit Status:

0) success
1) at least one file failed";

fn sample_source() -> ManualSource {
    let declarations = vec![
        FlagDeclaration::new("dry-run", FlagKind::Bool)
            .bound_to("optDry")
            .with_usage("Only print what would change."),
        FlagDeclaration::new("n", FlagKind::Bool).bound_to("optDry"),
        FlagDeclaration::new("level", FlagKind::Int).with_usage("Frobnication `strength`."),
    ];
    ManualSource::from_declarations("frob", DESCRIPTION, &declarations)
        .with_date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
}

#[test]
fn full_page_matches_expected_troff() {
    let page = ManualBuilder::default().build(&sample_source()).unwrap();

    let expected = "\
.TH \"FROB\" 1 \"2024-03-01\" \"Frob\" \"Frob Manual\"
.SH \"NAME\"
frob - frobnicate files in place
.PP
.SH \"SYNOPSIS\"
frob
.I \"[options...]\"
.I \"[argument...]\"
.SH \"DESCRIPTION\"
Frob reads every
.B \"file\"
given on the command line and
frobnicates it.
.PP
.RS
.RS
.nf
frob -n a.txt b.txt
.fi
.RE
.RE
.PP
.SH \"OPTIONS\"
.TP
\\fB\\-n\\fR, \\fB\\-dry\\-run\\fR
Only print what would change.
.TP
\\fB\\-level\\fR \\fIstrength\\fR
Frobnication strength.
.SH \"EXIT STATUS\"
.TP
\\fB0\\fR
success
.TP
\\fB1\\fR
at least one file failed
";
    assert_eq!(page, expected);
}

#[test]
fn description_tree_outline() {
    let tokens = Tokenizer::new().tokenize_str(DESCRIPTION);
    let mut parser = Parser::new();
    let root = parser.parse(&tokens).unwrap();
    let tree = parser.tree();

    let sections: Vec<&str> = tree
        .children(root)
        .iter()
        .filter(|&&id| tree.kind(id) == NodeKind::Section)
        .map(|&id| tree.text(id))
        .collect();
    assert_eq!(sections, ["Description", "Exit Status"]);

    let exit_status = *tree.children(root).last().unwrap();
    assert_eq!(
        tree.outline(exit_status).to_string(),
        "\
Section \"Exit Status\"
  List
    ListItem \"0\"
      Text \"success\"
    ListItem \"1\"
      Text \"at least one file failed\"
"
    );
}

#[test]
fn batch_skips_invalid_sources() {
    let sources = vec![
        sample_source(),
        ManualSource::new("", "nameless"),
        ManualSource::new("other", "other - tool"),
    ];
    let outcomes = build_all(&sources, &BuildConfig::default(), 2).unwrap();

    assert!(outcomes[0].is_ok());
    assert_eq!(
        outcomes[1].result,
        Err(BuildError::Invalid(vec![
            mango_core::ValidationError::EmptyProgramName
        ]))
    );
    assert!(outcomes[2].result.as_ref().unwrap().contains("other - tool"));
}

#[test]
fn builds_are_deterministic() {
    let source = sample_source();
    let builder = ManualBuilder::default();
    assert_eq!(builder.build(&source).unwrap(), builder.build(&source).unwrap());
}
