//! # テスト用モック
//!
//! ユースケース・ハンドラテストで使用するインメモリモック。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! todolist-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use todolist_domain::todo::{Todo, TodoContents, TodoId};

use crate::{
    db::{TransactionManager, TxContext},
    error::InfraError,
    repository::TodoRepository,
};

// ===== MockTransactionManager =====

/// 常に Mock の TxContext を返す TransactionManager
#[derive(Clone, Default)]
pub struct MockTransactionManager;

#[async_trait]
impl TransactionManager for MockTransactionManager {
    async fn begin(&self) -> Result<TxContext, InfraError> {
        Ok(TxContext::mock())
    }
}

// ===== MockTodoRepository =====

/// インメモリの TodoRepository
///
/// ID は 1 から採番し、削除後も再利用しない。
#[derive(Clone)]
pub struct MockTodoRepository {
    todos:   Arc<Mutex<Vec<Todo>>>,
    next_id: Arc<Mutex<i64>>,
}

impl Default for MockTodoRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTodoRepository {
    pub fn new() -> Self {
        Self {
            todos:   Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(Mutex::new(1)),
        }
    }

    /// 現在保持している ToDo の一覧（ID 昇順）
    pub fn snapshot(&self) -> Vec<Todo> {
        let mut todos = self.todos.lock().unwrap().clone();
        todos.sort_by_key(|t| t.id());
        todos
    }
}

#[async_trait]
impl TodoRepository for MockTodoRepository {
    async fn insert(
        &self,
        _tx: &mut TxContext,
        contents: &TodoContents,
    ) -> Result<Todo, InfraError> {
        let id = {
            let mut next_id = self.next_id.lock().unwrap();
            let id = *next_id;
            *next_id += 1;
            TodoId::from_i64(id)
        };
        let todo = Todo::new(id, contents.clone());
        self.todos.lock().unwrap().push(todo.clone());
        Ok(todo)
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, InfraError> {
        Ok(self
            .todos
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id() == id)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Todo>, InfraError> {
        Ok(self.snapshot())
    }

    async fn update(
        &self,
        _tx: &mut TxContext,
        id: TodoId,
        contents: &TodoContents,
    ) -> Result<Option<Todo>, InfraError> {
        let mut todos = self.todos.lock().unwrap();
        let Some(todo) = todos.iter_mut().find(|t| t.id() == id) else {
            return Ok(None);
        };
        *todo = todo.clone().with_contents(contents.clone());
        Ok(Some(todo.clone()))
    }

    async fn delete(&self, _tx: &mut TxContext, id: TodoId) -> Result<bool, InfraError> {
        let mut todos = self.todos.lock().unwrap();
        let before = todos.len();
        todos.retain(|t| t.id() != id);
        Ok(todos.len() < before)
    }
}
