//! Header texts shared by unit tests.

/// Four methods covering every stock catalog entry.
pub const SMALL_HEADER: &str = r#"#ifndef RUBY_PARSER_BUILDER_HH
#define RUBY_PARSER_BUILDER_HH

namespace ruby_parser {

typedef void* foreign_ptr;
typedef void* self_ptr;

struct builder;

struct builder {
	foreign_ptr(*accessible)(self_ptr builder, foreign_ptr node);
	foreign_ptr(*alias)(self_ptr builder, const token* alias, foreign_ptr to, foreign_ptr from);
	foreign_ptr(*args)(self_ptr builder, const token* begin, const node_list* args, const token* end, bool check_args);
	foreign_ptr(*nil)(self_ptr builder, size_t line);
};

}

#endif
"#;

/// A header whose struct body holds a data member.
pub const DATA_MEMBER_HEADER: &str = r#"struct builder {
	foreign_ptr(*nil)(self_ptr builder, size_t line);
	int cookie;
};
"#;
