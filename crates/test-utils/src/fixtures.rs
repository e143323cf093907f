//! Shared schema fixtures.
//!
//! Use these when the exact schema doesn't matter to the test. When the test
//! is about the schema structure, prefer an inline schema so the test stays
//! self-documenting.

/// The smallest schema with a deprecated field: `User.name`.
pub const DEPRECATED_SCHEMA: &str = r#"
type Query {
    user: User
}

type User {
    name: String @deprecated
    id: ID
}
"#;

/// Schema with recursive object types, for depth and complexity budgets.
///
/// `User.friends` and `Post.author` allow arbitrarily deep selections.
pub const NESTED_SCHEMA: &str = r#"
type Query {
    user(id: ID!): User
    users(filter: UserFilter, roles: [Role!]): [User!]!
    post(id: ID!): Post
}

type Mutation {
    rename(id: ID!, name: String!): User
}

type User {
    id: ID!
    name: String!
    email: String @deprecated(reason: "Use contact")
    contact: String
    role: Role
    friends(first: Int, limit: Int @deprecated(reason: "Use first")): [User!]!
    posts: [Post!]!
}

type Post {
    id: ID!
    title: String!
    author: User!
}

enum Role {
    ADMIN
    MEMBER
    GUEST @deprecated
}

input UserFilter {
    role: Role
    nameContains: String
}
"#;
