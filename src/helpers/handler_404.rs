pub fn page_not_found_handler(path: &str) -> String {
    format!("Oops looks like you landed at the wrong page: '{}'. Try 'go reservation'.", path)
}
