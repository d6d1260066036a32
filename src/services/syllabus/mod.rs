//! 教学大纲：主题、子主题与完成进度
//!
//! 所有人可读；写操作限主题所属教师或管理员，子主题的归属沿主题判断。

pub mod progress;
pub mod subtopics;
pub mod topics;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::lazy_storage_service;
use crate::models::syllabus::requests::{
    CreateSubtopicRequest, CreateTopicRequest, SyllabusQuery, UpdateSubtopicRequest,
    UpdateTopicRequest,
};

lazy_storage_service!(SyllabusService);

impl SyllabusService {
    pub async fn list_topics(
        &self,
        request: &HttpRequest,
        query: SyllabusQuery,
    ) -> ActixResult<HttpResponse> {
        topics::list_topics(self, request, query).await
    }

    pub async fn create_topic(
        &self,
        request: &HttpRequest,
        topic_data: CreateTopicRequest,
    ) -> ActixResult<HttpResponse> {
        topics::create_topic(self, request, topic_data).await
    }

    pub async fn update_topic(
        &self,
        request: &HttpRequest,
        topic_id: i64,
        update_data: UpdateTopicRequest,
    ) -> ActixResult<HttpResponse> {
        topics::update_topic(self, request, topic_id, update_data).await
    }

    pub async fn delete_topic(
        &self,
        request: &HttpRequest,
        topic_id: i64,
    ) -> ActixResult<HttpResponse> {
        topics::delete_topic(self, request, topic_id).await
    }

    pub async fn create_subtopic(
        &self,
        request: &HttpRequest,
        topic_id: i64,
        subtopic_data: CreateSubtopicRequest,
    ) -> ActixResult<HttpResponse> {
        subtopics::create_subtopic(self, request, topic_id, subtopic_data).await
    }

    pub async fn update_subtopic(
        &self,
        request: &HttpRequest,
        subtopic_id: i64,
        update_data: UpdateSubtopicRequest,
    ) -> ActixResult<HttpResponse> {
        subtopics::update_subtopic(self, request, subtopic_id, update_data).await
    }

    // 切换完成状态
    pub async fn toggle_subtopic(
        &self,
        request: &HttpRequest,
        subtopic_id: i64,
    ) -> ActixResult<HttpResponse> {
        subtopics::toggle_subtopic(self, request, subtopic_id).await
    }

    pub async fn delete_subtopic(
        &self,
        request: &HttpRequest,
        subtopic_id: i64,
    ) -> ActixResult<HttpResponse> {
        subtopics::delete_subtopic(self, request, subtopic_id).await
    }

    pub async fn get_progress(
        &self,
        request: &HttpRequest,
        query: SyllabusQuery,
    ) -> ActixResult<HttpResponse> {
        progress::get_progress(self, request, query).await
    }
}
