#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tidyfrag_parser::{
    AttributeOptions, HtmlParser, MultiValuedAttributes, SingleValuedAttributes,
};

#[derive(Debug, Arbitrary)]
struct AttributeInput {
    attributes: String,
    split_values_for: Vec<String>,
    split_values_by: Vec<String>,
    unwanted_attributes: Vec<String>,
}

fuzz_target!(|input: AttributeInput| {
    // Limit input size to prevent excessive resource usage
    if input.attributes.len() > 10_000 || input.split_values_by.len() > 8 {
        return;
    }

    let parser = HtmlParser::default();
    let options = AttributeOptions {
        split_values_for: input.split_values_for,
        split_values_by: input.split_values_by,
        unwanted_attributes: input.unwanted_attributes,
    };

    let mut single = SingleValuedAttributes::new();
    let mut multi = MultiValuedAttributes::new();
    parser
        .parse_attributes_with(&input.attributes, &mut single, Some(&mut multi), &options)
        .expect("a multi-valued map was supplied");

    for name in single.keys().chain(multi.keys()) {
        assert!(!options.is_unwanted(name));
    }
    for values in multi.values() {
        assert!(values.iter().all(|v| !v.is_empty()));
    }

    if let Some(tag) = parser.parse_tag(&format!("<span {}>", input.attributes)) {
        let _ = tag.to_tag(None);
    }
});
