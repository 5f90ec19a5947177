// src/domain/query.rs

use rusqlite::types::Value;

/// What a caller asks for when listing comments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentQuery {
    pub post_id: Option<i64>,
    /// Approval state as stored (`"0"`, `"1"`, `"spam"`, ...).
    pub approved: Option<String>,
    pub comment_type: Option<String>,
    pub limit: Option<u32>,
}

impl CommentQuery {
    pub fn for_post(post_id: i64) -> Self {
        Self {
            post_id: Some(post_id),
            ..Self::default()
        }
    }
}

/// The assembled pieces of a comment SELECT, handed to `comments_clauses`
/// hooks before the statement is built.
///
/// `where_sql` always starts from a true predicate, so hooks append
/// conditions with a leading `AND`. Every `?` placeholder in `where_sql`
/// has a matching entry in `params`, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentClauses {
    pub where_sql: String,
    pub params: Vec<Value>,
    pub order_by: String,
    pub limit: Option<u32>,
}

impl CommentClauses {
    pub fn from_query(query: &CommentQuery) -> Self {
        let mut clauses = CommentClauses {
            where_sql: "1=1".to_string(),
            params: Vec::new(),
            order_by: "created_at DESC, id DESC".to_string(),
            limit: query.limit,
        };

        if let Some(post_id) = query.post_id {
            clauses.and_where("post_id = ?", Value::Integer(post_id));
        }
        if let Some(approved) = &query.approved {
            clauses.and_where("approved = ?", Value::Text(approved.clone()));
        }
        if let Some(comment_type) = &query.comment_type {
            clauses.and_where("comment_type = ?", Value::Text(comment_type.clone()));
        }

        clauses
    }

    /// Appends ` AND <predicate>` with one bound parameter.
    pub fn and_where(&mut self, predicate: &str, param: Value) {
        self.where_sql.push_str(" AND ");
        self.where_sql.push_str(predicate);
        self.params.push(param);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_is_unfiltered() {
        let clauses = CommentClauses::from_query(&CommentQuery::default());
        assert_eq!(clauses.where_sql, "1=1");
        assert!(clauses.params.is_empty());
        assert_eq!(clauses.limit, None);
    }

    #[test]
    fn placeholders_line_up_with_params() {
        let query = CommentQuery {
            post_id: Some(7),
            approved: Some("1".to_string()),
            comment_type: None,
            limit: Some(10),
        };
        let clauses = CommentClauses::from_query(&query);

        assert_eq!(clauses.where_sql, "1=1 AND post_id = ? AND approved = ?");
        assert_eq!(
            clauses.params,
            vec![Value::Integer(7), Value::Text("1".to_string())]
        );
        assert_eq!(clauses.where_sql.matches('?').count(), clauses.params.len());
    }
}
