use payloads::{
    APIClient, ClientError, HouseId, MediaId,
    requests::{MAX_MEDIA_SIZE, MediaFile, MediaUpload},
    responses::{House, Media},
};

use crate::{
    items::{ItemAction, ItemKey, ItemList, remove_confirmed},
    status::FormErrors,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaDraft {
    pub title: String,
    pub is_main: bool,
    /// Where the stored image is served from. Empty until first saved.
    pub url: Option<String>,
    /// A file chosen but not yet uploaded.
    pub file: Option<MediaFile>,
}

impl MediaDraft {
    pub fn from_media(media: &Media) -> Self {
        Self {
            title: media.title.clone().unwrap_or_default(),
            is_main: media.is_main,
            url: Some(media.url.clone()),
            file: None,
        }
    }

    fn upload(&self) -> MediaUpload {
        MediaUpload {
            title: self.title.trim().to_string(),
            is_main: self.is_main,
            file: self.file.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSave {
    Create(MediaUpload),
    Update(MediaId, MediaUpload),
}

/// Check a picked file before it is attached to a draft.
pub fn check_file(file: &MediaFile) -> Result<(), String> {
    if !file.mime_type.starts_with("image/") {
        return Err(format!("{} is not an image", file.file_name));
    }
    if file.data.len() > MAX_MEDIA_SIZE {
        return Err(format!(
            "{} is larger than {} MB",
            file.file_name,
            MAX_MEDIA_SIZE / (1024 * 1024)
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImagesForm {
    pub items: ItemList<MediaDraft, MediaId>,
}

impl ImagesForm {
    pub fn seed(house: &House) -> Self {
        Self {
            items: ItemList::from_persisted(
                house
                    .medias
                    .iter()
                    .map(|media| (media.id, MediaDraft::from_media(media))),
            ),
        }
    }

    /// Attach a picked file as a new, unsaved image.
    pub fn add_image(&mut self, file: MediaFile) -> Result<ItemKey, String> {
        check_file(&file)?;
        Ok(self.items.push_local(MediaDraft {
            title: String::new(),
            is_main: self.items.is_empty(),
            url: None,
            file: Some(file),
        }))
    }

    /// Swap the file of an existing image.
    pub fn replace_file(
        &mut self,
        key: ItemKey,
        file: MediaFile,
    ) -> Result<(), String> {
        check_file(&file)?;
        if let Some(draft) = self.items.get_mut(key) {
            draft.file = Some(file);
        }
        Ok(())
    }

    pub fn set_title(&mut self, key: ItemKey, title: &str) {
        if let Some(draft) = self.items.get_mut(key) {
            draft.title = title.to_string();
        }
    }

    pub fn main_image(&self) -> Option<ItemKey> {
        self.items.iter().find(|e| e.value.is_main).map(|e| e.key)
    }

    /// Plan a save and mark it pending. `None` if the image is gone or
    /// already saving.
    pub fn begin_save(
        &mut self,
        key: ItemKey,
    ) -> Option<Result<MediaSave, FormErrors>> {
        let entry = self.items.get(key)?;
        let save = match &entry.id {
            None if entry.value.file.is_none() => {
                let mut errors = FormErrors::default();
                errors.set("file", "Choose an image to upload");
                return Some(Err(errors));
            }
            None => MediaSave::Create(entry.value.upload()),
            Some(id) => MediaSave::Update(*id, entry.value.upload()),
        };
        if !self.items.begin_action(key, ItemAction::Save) {
            return None;
        }
        Some(Ok(save))
    }

    pub fn finish_save(
        &mut self,
        key: ItemKey,
        result: Result<&Media, &ClientError>,
    ) {
        match result {
            Ok(media) => {
                self.items.mark_saved(key, media.id);
                if let Some(draft) = self.items.get_mut(key) {
                    *draft = MediaDraft::from_media(media);
                }
                self.items.finish_action(key, ItemAction::Save, Ok(()));
            }
            Err(e) => self.items.finish_action(
                key,
                ItemAction::Save,
                Err(e.to_string()),
            ),
        }
    }

    /// Plan "make main" for a saved image. Only the flag changes; the file
    /// is not re-sent.
    pub fn begin_make_main(
        &mut self,
        key: ItemKey,
    ) -> Option<(MediaId, MediaUpload)> {
        let entry = self.items.get(key)?;
        let id = entry.id?;
        let upload = MediaUpload {
            title: entry.value.title.trim().to_string(),
            is_main: true,
            file: None,
        };
        if !self.items.begin_action(key, ItemAction::MakeMain) {
            return None;
        }
        Some((id, upload))
    }

    /// The server keeps a single main image, so the others are cleared
    /// locally to match.
    pub fn finish_make_main(
        &mut self,
        key: ItemKey,
        result: Result<(), &ClientError>,
    ) {
        match result {
            Ok(()) => {
                let keys: Vec<ItemKey> =
                    self.items.iter().map(|e| e.key).collect();
                for other in keys {
                    if let Some(draft) = self.items.get_mut(other) {
                        draft.is_main = other == key;
                    }
                }
                self.items.finish_action(key, ItemAction::MakeMain, Ok(()));
            }
            Err(e) => self.items.finish_action(
                key,
                ItemAction::MakeMain,
                Err(e.to_string()),
            ),
        }
    }
}

pub async fn send_save(
    client: &APIClient,
    house_id: &HouseId,
    save: &MediaSave,
) -> Result<Media, ClientError> {
    match save {
        MediaSave::Create(upload) => {
            client.create_media(house_id, upload).await
        }
        MediaSave::Update(id, upload) => {
            client.update_media(house_id, id, upload).await
        }
    }
}

/// Save one image end to end. Local validation errors come back as
/// `Ok(Some(errors))`.
pub async fn save_image(
    client: &APIClient,
    house_id: &HouseId,
    form: &mut ImagesForm,
    key: ItemKey,
) -> Result<Option<FormErrors>, ClientError> {
    let save = match form.begin_save(key) {
        None => return Ok(None),
        Some(Err(errors)) => return Ok(Some(errors)),
        Some(Ok(save)) => save,
    };
    let result = send_save(client, house_id, &save).await;
    form.finish_save(key, result.as_ref());
    result.map(|_| None)
}

pub async fn make_main(
    client: &APIClient,
    house_id: &HouseId,
    form: &mut ImagesForm,
    key: ItemKey,
) -> Result<(), ClientError> {
    let Some((id, upload)) = form.begin_make_main(key) else {
        return Ok(());
    };
    let result = client.update_media(house_id, &id, &upload).await;
    form.finish_make_main(key, result.as_ref().map(|_| ()));
    result.map(|_| ())
}

/// Delete the image awaiting confirmation.
pub async fn remove_image(
    client: &APIClient,
    house_id: &HouseId,
    form: &mut ImagesForm,
) -> Result<(), ClientError> {
    remove_confirmed(&mut form.items, |media_id| async move {
        client.delete_media(house_id, &media_id).await
    })
    .await
}
