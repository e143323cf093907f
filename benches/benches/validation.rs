use apollo_compiler::validation::Valid;
use apollo_compiler::Schema;
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use graphql_validate::limits::count_tokens;
use graphql_validate::{
    validate, AssembledDocument, FragmentGraph, FragmentIndex, ParsedSource, Source,
    ValidateConfig,
};
use std::hint::black_box;

// Sample GraphQL schema for benchmarks
const SAMPLE_SCHEMA: &str = r#"
type Query {
  user(id: ID!): User
  users: [User!]!
  post(id: ID!): Post
  posts: [Post!]!
}

type User {
  id: ID!
  name: String!
  email: String! @deprecated(reason: "Use contact")
  contact: String
  friends: [User!]!
  posts: [Post!]!
}

type Post {
  id: ID!
  title: String!
  content: String!
  author: User!
}
"#;

// Operation using fragments defined in other sources
const OPERATION_WITH_FRAGMENTS: &str = r"
query GetUser($id: ID!) {
  user(id: $id) {
    ...UserFields
    friends {
      ...UserFields
      friends {
        ...UserFields
      }
    }
    posts {
      ...PostFields
    }
  }
}
";

const FRAGMENTS: &str = r"
fragment UserFields on User {
  id
  name
  posts {
    ...PostFields
  }
}

fragment PostFields on Post {
  id
  title
  author {
    id
  }
}
";

fn sample_schema() -> Valid<Schema> {
    match Schema::parse_and_validate(SAMPLE_SCHEMA, "schema.graphql") {
        Ok(schema) => schema,
        Err(with_errors) => panic!("invalid sample schema:\n{}", with_errors.errors),
    }
}

/// `count` operation sources sharing one fragment source.
fn sample_sources(count: usize) -> Vec<ParsedSource> {
    let mut sources = Vec::with_capacity(count + 1);
    for i in 0..count {
        sources.push(parse(
            &format!("operation{i}.graphql"),
            OPERATION_WITH_FRAGMENTS,
        ));
    }
    sources.push(parse("fragments.graphql", FRAGMENTS));
    sources
}

fn parse(name: &str, body: &str) -> ParsedSource {
    match ParsedSource::parse(Source::new(name, body)) {
        Ok(parsed) => parsed,
        Err(error) => panic!("{error}"),
    }
}

fn limits_config() -> ValidateConfig {
    ValidateConfig {
        max_depth: Some(10),
        max_alias_count: Some(10),
        max_directive_count: Some(10),
        max_token_count: Some(1000),
        ..ValidateConfig::default()
    }
}

fn bench_validate_batch(c: &mut Criterion) {
    let schema = sample_schema();
    let sources = sample_sources(50);
    let config = limits_config();

    c.bench_function("validate_batch_50", |b| {
        b.iter(|| {
            let invalid = validate(black_box(&schema), black_box(&sources), &config);
            black_box(invalid)
        });
    });
}

fn bench_build_graph(c: &mut Criterion) {
    let sources = sample_sources(50);

    c.bench_function("build_fragment_graph", |b| {
        b.iter(|| black_box(FragmentGraph::build(&FragmentIndex::collect(black_box(&sources)))));
    });
}

fn bench_assemble(c: &mut Criterion) {
    let sources = sample_sources(1);
    let graph = FragmentGraph::build(&FragmentIndex::collect(&sources));

    c.bench_function("assemble_document", |b| {
        b.iter_batched(
            || &sources[0],
            |parsed| black_box(AssembledDocument::assemble(parsed, &graph)),
            BatchSize::SmallInput,
        );
    });
}

fn bench_count_tokens(c: &mut Criterion) {
    c.bench_function("count_tokens", |b| {
        b.iter(|| black_box(count_tokens(black_box(OPERATION_WITH_FRAGMENTS))));
    });
}

criterion_group!(
    benches,
    bench_validate_batch,
    bench_build_graph,
    bench_assemble,
    bench_count_tokens
);
criterion_main!(benches);
