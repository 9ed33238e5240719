const LIMIT: usize = 1600;

#[test]
fn test_below_loc_limit() {
    let language = tokei::LanguageType::Rust;
    let mut languages = tokei::Languages::new();
    let config = tokei::Config { types: Some(vec![language]), ..tokei::Config::default() };
    languages.get_statistics(&["src"], &[], &config);
    let loc = languages[&language].code;
    assert!(loc <= LIMIT, "src/ has grown to {loc} lines of code, above the {LIMIT} budget");
}
