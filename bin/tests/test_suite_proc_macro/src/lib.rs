use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, LitStr};

/// Generates one `#[test]` per `.lox` file found (recursively) in the given
/// directory, relative to `bin/tests`. Each test passes the file's contents to
/// `lox_expect`, which must be in scope at the call site.
#[proc_macro]
pub fn generate_tests(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let dir = parse_macro_input!(input as LitStr).value();
    let root_dir = format!("{}/../{}", env!("CARGO_MANIFEST_DIR"), dir);

    let tests: Vec<TokenStream> = walkdir::WalkDir::new(&root_dir)
        .sort_by_file_name()
        .into_iter()
        .flatten()
        .filter(|entry| entry.path().extension() == Some("lox".as_ref()))
        .map(|entry| {
            let test_file_path = entry.path().to_string_lossy().to_string();
            let relative_test_path = entry.path().strip_prefix(&root_dir).unwrap().to_string_lossy();
            let test_ident = format_ident!(
                "test_{}",
                relative_test_path.replace(['/', '-'], "_").trim_end_matches(".lox")
            );
            quote! {
                #[test]
                fn #test_ident() {
                    lox_expect(std::fs::read_to_string(#test_file_path).unwrap().as_str());
                }
            }
        })
        .collect();

    quote! {
        #[ctor::ctor]
        fn init() {
            env_logger::init();
        }

        #(#tests)*
    }
    .into()
}
