pub mod download;
pub mod list;
pub mod manage;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::lazy_storage_service;
use crate::models::materials::entities::Material;
use crate::models::materials::requests::MaterialListParams;
use crate::models::users::entities::AuthUser;

lazy_storage_service!(MaterialService);

impl MaterialService {
    // 上传学习资料（multipart）
    pub async fn upload_material(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::upload_material(self, request, payload).await
    }

    pub async fn list_materials(
        &self,
        request: &HttpRequest,
        query: MaterialListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_materials(self, request, query).await
    }

    pub async fn get_material(
        &self,
        request: &HttpRequest,
        material_id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::get_material(self, request, material_id).await
    }

    pub async fn delete_material(
        &self,
        request: &HttpRequest,
        material_id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::delete_material(self, request, material_id).await
    }

    pub async fn download_material(
        &self,
        request: &HttpRequest,
        material_id: i64,
    ) -> ActixResult<HttpResponse> {
        download::download_material(self, request, material_id).await
    }
}

/// 学生只能访问本学期或未限定学期的资料
pub(crate) fn visible_to(material: &Material, user: &AuthUser) -> bool {
    !user.is_student() || material.semester.is_none() || material.semester == user.semester
}
