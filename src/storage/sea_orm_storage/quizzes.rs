//! 测验、题目与作答存储操作

use super::{SeaOrmStorage, write_error};
use crate::entity::quiz_attempts::{
    self, ActiveModel as AttemptActiveModel, Entity as QuizAttempts,
};
use crate::entity::quiz_questions::{
    self, ActiveModel as QuestionActiveModel, Entity as QuizQuestions,
};
use crate::entity::quizzes::{ActiveModel, Column, Entity as Quizzes};
use crate::entity::students::Entity as Students;
use crate::errors::{LmsError, Result};
use crate::models::{
    PaginationInfo,
    quizzes::{
        entities::{Quiz, QuizAttempt, QuizQuestion},
        requests::{CreateQuizRequest, NewQuestion, QuizListQuery, UpdateQuizRequest},
        responses::QuizListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

/// 在给定连接（通常是事务）上追加题目并重算 total_marks
async fn append_questions<C: ConnectionTrait>(
    conn: &C,
    quiz_id: i64,
    questions: Vec<NewQuestion>,
) -> Result<i32> {
    let positions: Vec<i32> = QuizQuestions::find()
        .select_only()
        .column(quiz_questions::Column::Position)
        .filter(quiz_questions::Column::QuizId.eq(quiz_id))
        .into_tuple()
        .all(conn)
        .await
        .map_err(|e| LmsError::database_operation(format!("查询题目序号失败: {e}")))?;
    let next_position = positions.iter().max().map(|p| p + 1).unwrap_or(0);

    if !questions.is_empty() {
        let mut models = Vec::with_capacity(questions.len());
        for (offset, q) in questions.into_iter().enumerate() {
            models.push(QuestionActiveModel {
                quiz_id: Set(quiz_id),
                position: Set(next_position + offset as i32),
                question_text: Set(q.question_text),
                options: Set(serde_json::to_string(&q.options)?),
                correct_answer: Set(q.correct_answer),
                marks: Set(q.marks),
                ..Default::default()
            });
        }

        QuizQuestions::insert_many(models)
            .exec(conn)
            .await
            .map_err(|e| LmsError::database_operation(format!("批量添加题目失败: {e}")))?;
    }

    let marks: Vec<i32> = QuizQuestions::find()
        .select_only()
        .column(quiz_questions::Column::Marks)
        .filter(quiz_questions::Column::QuizId.eq(quiz_id))
        .into_tuple()
        .all(conn)
        .await
        .map_err(|e| LmsError::database_operation(format!("统计题目分值失败: {e}")))?;
    let total_marks = i32::try_from(marks.iter().map(|&m| i64::from(m)).sum::<i64>())
        .map_err(|_| LmsError::validation("测验总分超出范围"))?;

    ActiveModel {
        id: Set(quiz_id),
        total_marks: Set(total_marks),
        updated_at: Set(chrono::Utc::now().timestamp()),
        ..Default::default()
    }
    .update(conn)
    .await
    .map_err(|e| LmsError::database_operation(format!("更新测验总分失败: {e}")))?;

    Ok(total_marks)
}

impl SeaOrmStorage {
    /// 创建测验，附带的题目在同一事务内写入
    pub async fn create_quiz_impl(&self, teacher_id: i64, req: CreateQuizRequest) -> Result<Quiz> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LmsError::database_operation(format!("开启事务失败: {e}")))?;

        let quiz = ActiveModel {
            teacher_id: Set(teacher_id),
            title: Set(req.title),
            description: Set(req.description),
            subject: Set(req.subject),
            semester: Set(req.semester),
            duration_minutes: Set(req.duration_minutes),
            total_marks: Set(0),
            is_published: Set(req.is_published.unwrap_or(false)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| LmsError::database_operation(format!("创建测验失败: {e}")))?;

        let questions = req.questions.unwrap_or_default();
        let total_marks = if questions.is_empty() {
            0
        } else {
            append_questions(&txn, quiz.id, questions).await?
        };

        txn.commit()
            .await
            .map_err(|e| LmsError::database_operation(format!("提交事务失败: {e}")))?;

        let mut quiz = quiz.into_quiz();
        quiz.total_marks = total_marks;
        Ok(quiz)
    }

    pub async fn get_quiz_by_id_impl(&self, id: i64) -> Result<Option<Quiz>> {
        let result = Quizzes::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询测验失败: {e}")))?;

        Ok(result.map(|m| m.into_quiz()))
    }

    pub async fn list_quizzes_with_pagination_impl(
        &self,
        query: QuizListQuery,
    ) -> Result<QuizListResponse> {
        let mut select = Quizzes::find();

        if query.published_only {
            select = select.filter(Column::IsPublished.eq(true));
        }
        if let Some(semester) = query.visible_semester {
            select = select.filter(
                Condition::any()
                    .add(Column::Semester.eq(semester))
                    .add(Column::Semester.is_null()),
            );
        }
        if let Some(ref subject) = query.subject {
            select = select.filter(Column::Subject.eq(subject.as_str()));
        }
        if let Some(semester) = query.semester {
            select = select.filter(Column::Semester.eq(semester));
        }
        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Title.contains(&escaped))
                    .add(Column::Description.contains(&escaped)),
            );
        }

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, query.size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| LmsError::database_operation(format!("查询测验总数失败: {e}")))?;

        let quizzes = paginator
            .fetch_page(query.page - 1)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询测验列表失败: {e}")))?;

        Ok(QuizListResponse {
            items: quizzes.into_iter().map(|m| m.into_quiz()).collect(),
            pagination: PaginationInfo::new(query.page, query.size, total),
        })
    }

    pub async fn update_quiz_impl(&self, id: i64, update: UpdateQuizRequest) -> Result<Option<Quiz>> {
        if self.get_quiz_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(subject) = update.subject {
            model.subject = Set(subject);
        }
        if let Some(semester) = update.semester {
            model.semester = Set(Some(semester));
        }
        if let Some(duration) = update.duration_minutes {
            model.duration_minutes = Set(Some(duration));
        }
        if let Some(is_published) = update.is_published {
            model.is_published = Set(is_published);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("更新测验失败: {e}")))?;

        Ok(Some(result.into_quiz()))
    }

    pub async fn delete_quiz_impl(&self, id: i64) -> Result<bool> {
        let result = Quizzes::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("删除测验失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 按序号列出题目
    pub async fn list_quiz_questions_impl(&self, quiz_id: i64) -> Result<Vec<QuizQuestion>> {
        let rows = QuizQuestions::find()
            .filter(quiz_questions::Column::QuizId.eq(quiz_id))
            .order_by_asc(quiz_questions::Column::Position)
            .order_by_asc(quiz_questions::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询题目失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_question()).collect())
    }

    /// 批量添加题目：插入与总分更新一起提交或一起回滚
    pub async fn add_quiz_questions_impl(
        &self,
        quiz_id: i64,
        questions: Vec<NewQuestion>,
    ) -> Result<(Vec<QuizQuestion>, i32)> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| LmsError::database_operation(format!("开启事务失败: {e}")))?;

        // 失败时 txn 被 drop，自动回滚
        let total_marks = append_questions(&txn, quiz_id, questions).await?;

        txn.commit()
            .await
            .map_err(|e| LmsError::database_operation(format!("提交事务失败: {e}")))?;

        let questions = self.list_quiz_questions_impl(quiz_id).await?;
        Ok((questions, total_marks))
    }

    /// 记录作答；同一学生重复作答触发唯一约束，返回 Conflict
    pub async fn create_quiz_attempt_impl(
        &self,
        quiz_id: i64,
        student_id: i64,
        score: i32,
        total_marks: i32,
        answers: &serde_json::Value,
    ) -> Result<QuizAttempt> {
        let model = AttemptActiveModel {
            quiz_id: Set(quiz_id),
            student_id: Set(student_id),
            score: Set(score),
            total_marks: Set(total_marks),
            answers: Set(serde_json::to_string(answers)?),
            submitted_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error("记录作答失败", e))?;

        Ok(result.into_attempt(None))
    }

    pub async fn get_quiz_attempt_impl(
        &self,
        quiz_id: i64,
        student_id: i64,
    ) -> Result<Option<QuizAttempt>> {
        let result = QuizAttempts::find()
            .filter(quiz_attempts::Column::QuizId.eq(quiz_id))
            .filter(quiz_attempts::Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询作答失败: {e}")))?;

        Ok(result.map(|m| m.into_attempt(None)))
    }

    /// 某测验全部作答，分数高的在前
    pub async fn list_quiz_attempts_impl(&self, quiz_id: i64) -> Result<Vec<QuizAttempt>> {
        let rows = QuizAttempts::find()
            .filter(quiz_attempts::Column::QuizId.eq(quiz_id))
            .find_also_related(Students)
            .order_by_desc(quiz_attempts::Column::Score)
            .order_by_asc(quiz_attempts::Column::SubmittedAt)
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询作答列表失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(m, student)| m.into_attempt(student))
            .collect())
    }
}
