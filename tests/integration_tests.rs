// Integration tests for autocompat

mod integration {
    mod crawler_test;
    mod end_to_end_test;
}
