//! 学习资料存储操作

use super::SeaOrmStorage;
use crate::entity::materials::{ActiveModel, Column, Entity as Materials};
use crate::errors::{LmsError, Result};
use crate::models::{
    PaginationInfo,
    materials::{
        entities::Material,
        requests::{MaterialListQuery, NewMaterial},
        responses::MaterialListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    pub async fn create_material_impl(&self, material: NewMaterial) -> Result<Material> {
        let model = ActiveModel {
            teacher_id: Set(material.teacher_id),
            title: Set(material.title),
            description: Set(material.description),
            subject: Set(material.subject),
            semester: Set(material.semester),
            file_name: Set(material.file_name),
            file_path: Set(material.file_path),
            file_size: Set(material.file_size),
            file_type: Set(material.file_type),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("创建资料失败: {e}")))?;

        Ok(result.into_material())
    }

    pub async fn get_material_by_id_impl(&self, id: i64) -> Result<Option<Material>> {
        let result = Materials::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询资料失败: {e}")))?;

        Ok(result.map(|m| m.into_material()))
    }

    pub async fn list_materials_with_pagination_impl(
        &self,
        query: MaterialListQuery,
    ) -> Result<MaterialListResponse> {
        let mut select = Materials::find();

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
            .map_err(|e| LmsError::database_operation(format!("查询资料总数失败: {e}")))?;

        let materials = paginator
            .fetch_page(query.page - 1)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询资料列表失败: {e}")))?;

        Ok(MaterialListResponse {
            items: materials.into_iter().map(|m| m.into_material()).collect(),
            pagination: PaginationInfo::new(query.page, query.size, total),
        })
    }

    pub async fn delete_material_impl(&self, id: i64) -> Result<bool> {
        let result = Materials::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("删除资料失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
