use sea_orm::ActiveValue::{NotSet, Set};

use crate::storage::models::{Link, NewFile, NewLink, StoredFile};
use migration::entities::{link, stored_file};

/// 将 link::Model 转换为 Link
pub fn model_to_link(model: link::Model) -> Link {
    Link {
        id: model.id,
        short_code: model.short_code,
        long_url: model.long_url,
        title: model.title,
        created_at: model.created_at,
        last_access: model.last_access,
        clicks: model.clicks.max(0) as u64,
    }
}

/// 新链接的 ActiveModel：id 由数据库分配，clicks 从 0 开始，last_access 为空
pub fn new_link_to_active_model(new_link: &NewLink) -> link::ActiveModel {
    link::ActiveModel {
        id: NotSet,
        short_code: Set(new_link.short_code.clone()),
        long_url: Set(new_link.long_url.clone()),
        title: Set(new_link.title.clone()),
        created_at: Set(new_link.created_at),
        last_access: Set(None),
        clicks: Set(0),
    }
}

pub fn model_to_stored_file(model: stored_file::Model) -> StoredFile {
    StoredFile {
        id: model.id,
        stored_name: model.stored_name,
        original_name: model.original_name,
        size: model.size.max(0) as u64,
        content: model.content,
        content_type: model.content_type,
        uploaded_at: model.uploaded_at,
    }
}

/// size 取自实际写入的内容长度
pub fn new_file_to_active_model(new_file: &NewFile) -> stored_file::ActiveModel {
    stored_file::ActiveModel {
        id: NotSet,
        stored_name: Set(new_file.stored_name.clone()),
        original_name: Set(new_file.original_name.clone()),
        content: Set(new_file.content.clone()),
        content_type: Set(new_file.content_type.clone()),
        size: Set(new_file.content.len() as i64),
        uploaded_at: Set(new_file.uploaded_at),
    }
}
