use crate::app::{Message, Model};
use crate::editor::EditorLoader;

/// Work a message needs beyond the state change in [`super::update`].
///
/// Runs before `update` takes the message, so it sees the model as it was.
pub(super) fn handle_message_side_effects(
    model: &mut Model,
    loader: &mut EditorLoader,
    msg: &Message,
) {
    if matches!(msg, Message::ShowEdit)
        && model.begin_editor_load()
        && let Err(err) = loader.start()
    {
        model.finish_editor_load(Err(err));
    }
}
